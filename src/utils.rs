// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::{Money, money_from_input};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Price arguments are typed the way the register form takes them: digits, cents first.
pub fn parse_price(s: &str) -> Result<Money> {
    money_from_input(s).with_context(|| format!("Invalid price '{}'", s))
}

pub fn parse_quantity(s: &str) -> Result<i64> {
    let q = s
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid quantity '{}'", s))?;
    if q < 0 {
        return Err(anyhow::anyhow!("Quantity must be zero or more, got {}", q));
    }
    Ok(q)
}

/// `ID` or `ID:N` for N taps on the same product.
pub fn parse_cart_arg(s: &str) -> Result<(i64, u32)> {
    let (id_raw, n_raw) = match s.split_once(':') {
        Some((id, n)) => (id, Some(n)),
        None => (s, None),
    };
    let id = id_raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid product id in '{}'", s))?;
    let n = match n_raw {
        Some(n) => n
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid count in '{}'", s))?,
        None => 1,
    };
    if n == 0 {
        return Err(anyhow::anyhow!("Count must be at least 1 in '{}'", s));
    }
    Ok((id, n))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
