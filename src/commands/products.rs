// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, NewProduct, Product, ProductUpdate};
use crate::products::{create_product, delete_product, get_product, update_product};
use crate::session::{self, Session};
use crate::utils::{parse_date, parse_price, parse_quantity, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("categories", _)) = m.subcommand() {
        let rows = Category::ALL
            .iter()
            .map(|c| vec![c.as_str().to_string(), c.label().to_string()])
            .collect();
        println!("{}", pretty_table(&["Value", "Category"], rows));
        return Ok(());
    }
    let session = session::current(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let p = add(conn, &session, sub)?;
            println!("Registered product #{} '{}'", p.id, p.name);
        }
        Some(("show", sub)) => {
            let id = parse_id(sub)?;
            print_detail(&get_product(conn, &session, id)?);
        }
        Some(("edit", sub)) => {
            let p = edit(conn, &session, sub)?;
            println!("Updated product #{} '{}'", p.id, p.name);
            print_detail(&p);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub)?;
            delete_product(conn, &session, id)?;
            println!("Removed product #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_id(sub: &clap::ArgMatches) -> Result<i64> {
    let raw = sub.get_one::<String>("id").unwrap();
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid product id '{}'", raw))
}

pub fn add(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<Product> {
    let new = NewProduct {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        buy_price: parse_price(sub.get_one::<String>("buy").unwrap())?,
        sell_price: parse_price(sub.get_one::<String>("sell").unwrap())?,
        quantity: parse_quantity(sub.get_one::<String>("qty").unwrap())?,
        location: sub
            .get_one::<String>("location")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        category: sub.get_one::<String>("category").unwrap().parse::<Category>()?,
        expiry_date: parse_date(sub.get_one::<String>("expiry").unwrap())?,
        image: sub
            .get_one::<String>("image")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
    };
    Ok(create_product(conn, session, &new)?)
}

pub fn edit(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<Product> {
    let id = parse_id(sub)?;
    let upd = ProductUpdate {
        buy_price: sub.get_one::<String>("buy").map(|s| parse_price(s)).transpose()?,
        sell_price: sub.get_one::<String>("sell").map(|s| parse_price(s)).transpose()?,
        quantity: sub.get_one::<String>("qty").map(|s| parse_quantity(s)).transpose()?,
        location: sub.get_one::<String>("location").cloned(),
    };
    Ok(update_product(conn, session, id, &upd)?)
}

fn print_detail(p: &Product) {
    let rows = vec![
        vec!["ID".into(), p.id.to_string()],
        vec!["Name".into(), p.name.clone()],
        vec!["Buy price".into(), p.buy_price.to_string()],
        vec!["Sell price".into(), p.sell_price.to_string()],
        vec!["Quantity".into(), p.quantity.to_string()],
        vec!["Location".into(), p.location.clone()],
        vec!["Category".into(), p.category.label().to_string()],
        vec!["Expiry".into(), p.expiry_date.format("%d/%m/%Y").to_string()],
        vec!["Image".into(), p.image.clone().unwrap_or_default()],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
}
