// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::{MAX_PRICE, Money};
use crate::errors::{Error, Result};
use crate::models::{Category, NewProduct, Product, ProductUpdate};
use crate::session::Session;
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

const PRODUCT_COLUMNS: &str = "id, name, buy_price_cents, sell_price_cents, quantity, location, category, expiry_date, image";

/// Largest on-hand quantity a product may carry.
pub const MAX_QUANTITY: i64 = 1_000_000;

fn check_quantity(q: i64) -> Result<()> {
    if !(0..=MAX_QUANTITY).contains(&q) {
        return Err(Error::Validation(format!(
            "quantity must be between 0 and {}, got {}",
            MAX_QUANTITY, q
        )));
    }
    Ok(())
}

fn check_price(label: &str, price: Money) -> Result<()> {
    if price < Money::ZERO || price > MAX_PRICE {
        return Err(Error::Validation(format!(
            "{} must be between {} and {}, got {}",
            label, Money::ZERO, MAX_PRICE, price
        )));
    }
    Ok(())
}

fn product_from_row(r: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: r.get(0)?,
        name: r.get(1)?,
        buy_price: r.get(2)?,
        sell_price: r.get(3)?,
        quantity: r.get(4)?,
        location: r.get(5)?,
        category: r.get(6)?,
        expiry_date: r.get(7)?,
        image: r.get(8)?,
    })
}

pub fn create_product(conn: &Connection, session: &Session, p: &NewProduct) -> Result<Product> {
    let name = p.name.trim();
    if name.is_empty() {
        return Err(Error::Validation("product name must not be empty".into()));
    }
    check_quantity(p.quantity)?;
    check_price("buy price", p.buy_price)?;
    check_price("sell price", p.sell_price)?;
    conn.execute(
        "INSERT INTO products(user_id, name, buy_price_cents, sell_price_cents, quantity, location, category, expiry_date, image)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            session.user_id(),
            name,
            p.buy_price,
            p.sell_price,
            p.quantity,
            p.location.trim(),
            p.category,
            p.expiry_date,
            p.image
        ],
    )?;
    let id = conn.last_insert_rowid();
    info!(product_id = id, name, "registered product");
    get_product(conn, session, id)
}

pub fn get_product(conn: &Connection, session: &Session, id: i64) -> Result<Product> {
    conn.query_row(
        &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id=?1 AND user_id=?2"),
        params![id, session.user_id()],
        product_from_row,
    )
    .optional()?
    .ok_or(Error::ProductNotFound(id))
}

pub fn list_products(conn: &Connection, session: &Session) -> Result<Vec<Product>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE user_id=?1 ORDER BY name COLLATE NOCASE, id"
    ))?;
    let rows = stmt.query_map(params![session.user_id()], product_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn update_product(
    conn: &Connection,
    session: &Session,
    id: i64,
    upd: &ProductUpdate,
) -> Result<Product> {
    let mut current = get_product(conn, session, id)?;
    if let Some(q) = upd.quantity {
        check_quantity(q)?;
        current.quantity = q;
    }
    if let Some(b) = upd.buy_price {
        check_price("buy price", b)?;
        current.buy_price = b;
    }
    if let Some(s) = upd.sell_price {
        check_price("sell price", s)?;
        current.sell_price = s;
    }
    if let Some(ref l) = upd.location {
        current.location = l.trim().to_string();
    }
    conn.execute(
        "UPDATE products SET buy_price_cents=?1, sell_price_cents=?2, quantity=?3, location=?4
         WHERE id=?5 AND user_id=?6",
        params![
            current.buy_price,
            current.sell_price,
            current.quantity,
            current.location,
            id,
            session.user_id()
        ],
    )?;
    info!(product_id = id, "updated product");
    Ok(current)
}

pub fn delete_product(conn: &Connection, session: &Session, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM products WHERE id=?1 AND user_id=?2",
        params![id, session.user_id()],
    )?;
    if n == 0 {
        return Err(Error::ProductNotFound(id));
    }
    info!(product_id = id, "deleted product");
    Ok(())
}

/// Stock view filters; an empty filter keeps every product.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub expiring_this_month: bool,
}

impl ProductFilter {
    pub fn matches(&self, p: &Product, today: NaiveDate) -> bool {
        if let Some(term) = self.search.as_deref() {
            if !p.name.to_lowercase().contains(&term.trim().to_lowercase()) {
                return false;
            }
        }
        if let Some(cat) = self.category {
            if p.category != cat {
                return false;
            }
        }
        if self.expiring_this_month
            && (p.expiry_date.month() != today.month() || p.expiry_date.year() != today.year())
        {
            return false;
        }
        true
    }
}

pub fn filter_products<'a>(
    products: &'a [Product],
    filter: &ProductFilter,
    today: NaiveDate,
) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p, today)).collect()
}
