// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::Money;
use crate::journal::Journal;
use crate::sales::list_sales;
use crate::session::{self, Session};
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use std::collections::HashSet;

pub fn handle(conn: &Connection, journal: &Journal) -> Result<()> {
    let session = session::current(conn)?;
    let today = chrono::Local::now().date_naive();
    let rows = find_issues(conn, &session, journal, today)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn find_issues(
    conn: &Connection,
    session: &Session,
    journal: &Journal,
    today: NaiveDate,
) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Names shared by several products
    let mut stmt = conn.prepare(
        "SELECT name, COUNT(*) FROM products WHERE user_id=?1 GROUP BY lower(name) HAVING COUNT(*) > 1 ORDER BY name",
    )?;
    let mut cur = stmt.query(params![session.user_id()])?;
    while let Some(r) = cur.next()? {
        let name: String = r.get(0)?;
        let n: i64 = r.get(1)?;
        rows.push(vec!["duplicate_product_name".into(), format!("{} ({}x)", name, n)]);
    }

    // 2) Expired products still on hand
    let mut stmt2 = conn.prepare(
        "SELECT id, name, expiry_date, quantity FROM products WHERE user_id=?1 AND quantity > 0 AND expiry_date < ?2 ORDER BY expiry_date",
    )?;
    let mut cur2 = stmt2.query(params![session.user_id(), today])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let expiry: NaiveDate = r.get(2)?;
        let qty: i64 = r.get(3)?;
        rows.push(vec![
            "expired_in_stock".into(),
            format!("#{} {} expired {} ({} left)", id, name, expiry, qty),
        ]);
    }

    // 3) Sale totals that disagree with their items, and sales missing from the journal
    let sales = list_sales(conn, session)?;
    for s in &sales {
        let items_total: Money = s.items.iter().map(|i| i.line_total()).sum();
        if items_total.to_decimal() != s.total_amount {
            rows.push(vec![
                "sale_total_mismatch".into(),
                format!("#{} total {} items {}", s.id, s.total_amount, items_total.to_decimal()),
            ]);
        }
    }
    match journal.load() {
        Ok(mirrored) => {
            let keys: HashSet<_> = mirrored.iter().map(|s| s.idempotency_key).collect();
            for s in sales.iter().filter(|s| !keys.contains(&s.idempotency_key)) {
                rows.push(vec![
                    "sale_not_in_journal".into(),
                    format!("#{} {}", s.id, s.display_date()),
                ]);
            }
        }
        Err(e) => rows.push(vec!["journal_unreadable".into(), e.to_string()]),
    }

    Ok(rows)
}
