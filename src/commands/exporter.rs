// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::sales::list_sales;
use crate::session;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("sales", sub)) => export_sales(conn, sub),
        _ => Ok(()),
    }
}

fn export_sales(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let session = session::current(conn)?;
    let mut sales = list_sales(conn, &session)?;
    sales.reverse();

    match fmt.as_str() {
        "csv" => {
            // one row per sold item
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "sale_id", "date", "payment_method", "product_id", "product", "quantity",
                "unit_price", "subtotal", "sale_total",
            ])?;
            for s in &sales {
                for it in &s.items {
                    wtr.write_record([
                        s.id.to_string(),
                        s.display_date(),
                        s.payment_method.to_string(),
                        it.product_id.to_string(),
                        it.name.clone(),
                        it.quantity.to_string(),
                        it.sell_price.to_decimal().to_string(),
                        it.line_total().to_decimal().to_string(),
                        s.total_amount.to_string(),
                    ])?;
                }
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&sales)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported {} sales to {}", sales.len(), out);
    Ok(())
}
