// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::Money;
use crate::errors::{Error, Result};
use crate::models::{PaymentMethod, Sale, SaleItem};
use crate::session::Session;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Inserts a sale and its items. Callers run this inside the checkout transaction.
pub fn insert_sale(
    conn: &Connection,
    session: &Session,
    key: Uuid,
    payment: PaymentMethod,
    sold_at: NaiveDateTime,
    items: &[SaleItem],
) -> Result<Sale> {
    let mut total = Money::ZERO;
    for it in items {
        total = it
            .sell_price
            .checked_mul(it.quantity)
            .and_then(|line| total.checked_add(line))
            .ok_or_else(|| Error::InvalidAmount(format!("{} x {}", it.sell_price, it.quantity)))?;
    }
    let total = total.to_decimal();
    conn.execute(
        "INSERT INTO sales(user_id, idempotency_key, total_amount, payment_method, sold_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            session.user_id(),
            key.to_string(),
            total.to_string(),
            payment,
            sold_at
        ],
    )?;
    let sale_id = conn.last_insert_rowid();
    let mut stmt = conn.prepare(
        "INSERT INTO sale_items(sale_id, position, product_id, name, buy_price_cents, sell_price_cents, category, quantity)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for (pos, it) in items.iter().enumerate() {
        stmt.execute(params![
            sale_id,
            pos as i64,
            it.product_id,
            it.name,
            it.buy_price,
            it.sell_price,
            it.category,
            it.quantity
        ])?;
    }
    Ok(Sale {
        id: sale_id,
        idempotency_key: key,
        total_amount: total,
        payment_method: payment,
        sold_at,
        items: items.to_vec(),
    })
}

fn parse_total(raw: &str) -> rusqlite::Result<Decimal> {
    raw.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

fn load_items(conn: &Connection, sale_ids: &[i64]) -> Result<HashMap<i64, Vec<SaleItem>>> {
    let mut out: HashMap<i64, Vec<SaleItem>> = HashMap::new();
    let mut stmt = conn.prepare(
        "SELECT product_id, name, buy_price_cents, sell_price_cents, category, quantity
         FROM sale_items WHERE sale_id=?1 ORDER BY position",
    )?;
    for id in sale_ids {
        let rows = stmt.query_map(params![id], |r| {
            Ok(SaleItem {
                product_id: r.get(0)?,
                name: r.get(1)?,
                buy_price: r.get(2)?,
                sell_price: r.get(3)?,
                category: r.get(4)?,
                quantity: r.get(5)?,
            })
        })?;
        let items = out.entry(*id).or_default();
        for row in rows {
            items.push(row?);
        }
    }
    Ok(out)
}

/// Looks up a sale by the idempotency key its checkout was created with.
pub fn find_by_key(conn: &Connection, session: &Session, key: Uuid) -> Result<Option<Sale>> {
    let head = conn
        .query_row(
            "SELECT id, idempotency_key, total_amount, payment_method, sold_at
             FROM sales WHERE idempotency_key=?1 AND user_id=?2",
            params![key.to_string(), session.user_id()],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    parse_total(&r.get::<_, String>(2)?)?,
                    r.get::<_, PaymentMethod>(3)?,
                    r.get::<_, NaiveDateTime>(4)?,
                ))
            },
        )
        .optional()?;
    let Some((id, total, payment, sold_at)) = head else {
        return Ok(None);
    };
    let mut items = load_items(conn, &[id])?;
    Ok(Some(Sale {
        id,
        idempotency_key: key,
        total_amount: total,
        payment_method: payment,
        sold_at,
        items: items.remove(&id).unwrap_or_default(),
    }))
}

/// All sales of the session's user, newest first.
pub fn list_sales(conn: &Connection, session: &Session) -> Result<Vec<Sale>> {
    let mut stmt = conn.prepare(
        "SELECT id, idempotency_key, total_amount, payment_method, sold_at
         FROM sales WHERE user_id=?1 ORDER BY sold_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![session.user_id()], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            parse_total(&r.get::<_, String>(2)?)?,
            r.get::<_, PaymentMethod>(3)?,
            r.get::<_, NaiveDateTime>(4)?,
        ))
    })?;
    let mut heads = Vec::new();
    for row in rows {
        heads.push(row?);
    }
    let ids: Vec<i64> = heads.iter().map(|h| h.0).collect();
    let mut items = load_items(conn, &ids)?;
    heads
        .into_iter()
        .map(|(id, key, total, payment, sold_at)| {
            let idempotency_key = Uuid::parse_str(&key)
                .map_err(|e| Error::Validation(format!("sale {} has a bad key: {}", id, e)))?;
            Ok(Sale {
                id,
                idempotency_key,
                total_amount: total,
                payment_method: payment,
                sold_at,
                items: items.remove(&id).unwrap_or_default(),
            })
        })
        .collect()
}

/// Sales from the start of `start` to the end of `end`, both days included.
pub fn filter_by_date(sales: &[Sale], start: NaiveDate, end: NaiveDate) -> Result<Vec<&Sale>> {
    if start > end {
        return Err(Error::Validation(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    let from = start.and_time(NaiveTime::MIN);
    let Some(to) = end.succ_opt().map(|d| d.and_time(NaiveTime::MIN)) else {
        return Ok(sales.iter().filter(|s| s.sold_at >= from).collect());
    };
    Ok(sales
        .iter()
        .filter(|s| s.sold_at >= from && s.sold_at < to)
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodTotal {
    pub payment_method: PaymentMethod,
    pub count: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub by_method: Vec<MethodTotal>,
    pub count: usize,
    pub total: Decimal,
}

/// Count and total per payment method, in the fixed method order; methods
/// without sales are left out.
pub fn summarize<'a, I>(sales: I) -> SalesSummary
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut acc: HashMap<PaymentMethod, (usize, Decimal)> = HashMap::new();
    for s in sales {
        let e = acc.entry(s.payment_method).or_insert((0, Decimal::ZERO));
        e.0 += 1;
        e.1 += s.total_amount;
    }
    let by_method: Vec<MethodTotal> = PaymentMethod::ALL
        .into_iter()
        .filter_map(|m| {
            acc.get(&m).map(|(count, total)| MethodTotal {
                payment_method: m,
                count: *count,
                total: *total,
            })
        })
        .collect();
    SalesSummary {
        count: by_method.iter().map(|m| m.count).sum(),
        total: by_method.iter().map(|m| m.total).sum(),
        by_method,
    }
}
