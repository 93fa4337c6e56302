// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Sale;
use crate::sales::{filter_by_date, list_sales, summarize};
use crate::session::{self, Session};
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let session = session::current(conn)?;
    match m.subcommand() {
        Some(("list", sub)) => list(conn, &session, sub)?,
        Some(("summary", sub)) => summary(conn, &session, sub)?,
        _ => {}
    }
    Ok(())
}

/// Sales of the session, narrowed to `--from`/`--to` when both are given.
pub fn query_sales(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<Vec<Sale>> {
    let all = list_sales(conn, session)?;
    match (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
        (Some(from), Some(to)) => {
            let start = parse_date(from)?;
            let end = parse_date(to)?;
            Ok(filter_by_date(&all, start, end)?
                .into_iter()
                .cloned()
                .collect())
        }
        _ => Ok(all),
    }
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_sales(conn, session, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.display_date(),
                    format!("R$ {:.2}", s.total_amount),
                    s.payment_method.label().to_string(),
                    s.items.iter().map(|i| i.quantity).sum::<i64>().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Sale", "Date", "Total", "Payment", "Items"], rows)
        );
    }
    Ok(())
}

fn summary(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_sales(conn, session, sub)?;
    let sum = summarize(&data);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &sum)? {
        let mut rows: Vec<Vec<String>> = sum
            .by_method
            .iter()
            .map(|m| {
                vec![
                    m.payment_method.label().to_string(),
                    m.count.to_string(),
                    format!("R$ {:.2}", m.total),
                ]
            })
            .collect();
        rows.push(vec![
            "Total".to_string(),
            sum.count.to_string(),
            format!("R$ {:.2}", sum.total),
        ]);
        println!("{}", pretty_table(&["Payment", "Sales", "Amount"], rows));
    }
    Ok(())
}
