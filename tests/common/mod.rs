// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use pdv::currency::Money;
use pdv::models::{Category, NewProduct, Product};
use pdv::products::create_product;
use pdv::session::{self, Session};
use rusqlite::Connection;

pub const TEST_COST: u32 = 4;

pub fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    pdv::db::init_schema(&conn).unwrap();
    conn
}

pub fn login(conn: &Connection) -> Session {
    session::login(conn, "loja@example.com", "secret", Some("Mercadinho"), TEST_COST).unwrap()
}

pub fn setup_logged_in() -> (Connection, Session) {
    let conn = setup();
    let s = login(&conn);
    (conn, s)
}

pub fn new_product(name: &str, sell_cents: i64, quantity: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        buy_price: Money::from_cents(sell_cents / 2),
        sell_price: Money::from_cents(sell_cents),
        quantity,
        location: "A1".to_string(),
        category: Category::Bebidas,
        expiry_date: NaiveDate::from_ymd_opt(2030, 1, 31).unwrap(),
        image: None,
    }
}

pub fn add_product(conn: &Connection, s: &Session, name: &str, sell_cents: i64, quantity: i64) -> Product {
    create_product(conn, s, &new_product(name, sell_cents, quantity)).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn stock_of(conn: &Connection, id: i64) -> i64 {
    conn.query_row("SELECT quantity FROM products WHERE id=?1", [id], |r| r.get(0))
        .unwrap()
}

pub fn count_sales(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM sales", [], |r| r.get(0))
        .unwrap()
}
