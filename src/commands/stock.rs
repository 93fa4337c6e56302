// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Product};
use crate::products::{ProductFilter, filter_products, list_products};
use crate::session::{self, Session};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let session = session::current(conn)?;
        let today = chrono::Local::now().date_naive();
        let data = query_rows(conn, &session, sub, today)?;
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
            let rows: Vec<Vec<String>> = data
                .iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.name.clone(),
                        p.sell_price.to_string(),
                        p.quantity.to_string(),
                        p.category.label().to_string(),
                        p.location.clone(),
                        p.expiry_date.format("%d/%m/%Y").to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["ID", "Name", "Sell", "Qty", "Category", "Location", "Expiry"],
                    rows
                )
            );
        }
    }
    Ok(())
}

pub fn query_rows(
    conn: &Connection,
    session: &Session,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Vec<Product>> {
    let filter = ProductFilter {
        search: sub
            .get_one::<String>("search")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        category: sub
            .get_one::<String>("category")
            .map(|s| s.parse::<Category>())
            .transpose()?,
        expiring_this_month: sub.get_flag("expiring"),
    };
    let all = list_products(conn, session)?;
    Ok(filter_products(&all, &filter, today)
        .into_iter()
        .cloned()
        .collect())
}
