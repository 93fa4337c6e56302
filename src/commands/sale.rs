// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::checkout::{Checkout, FinalizeOutcome};
use crate::journal::Journal;
use crate::models::PaymentMethod;
use crate::session::{self, Session};
use crate::utils::{parse_cart_arg, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::io::{BufRead, Write};

pub fn handle(conn: &mut Connection, journal: &Journal, m: &clap::ArgMatches) -> Result<()> {
    let session = session::current(conn)?;
    match m.subcommand() {
        Some(("checkout", sub)) => {
            let mut items = Vec::new();
            for raw in sub.get_many::<String>("add").unwrap() {
                items.push(parse_cart_arg(raw)?);
            }
            let payment = sub
                .get_one::<String>("payment")
                .map(|s| s.parse::<PaymentMethod>())
                .transpose()?;
            let now = chrono::Local::now().naive_local();
            let outcome = checkout(conn, session, journal, &items, payment, now)?;
            print_outcome(&mut std::io::stdout(), &outcome)?;
        }
        Some(("shell", _)) => {
            let stdin = std::io::stdin();
            run_shell(conn, session, journal, stdin.lock(), std::io::stdout())?;
        }
        _ => {}
    }
    Ok(())
}

/// Builds a cart from `(product id, taps)` pairs and finalizes it in one go.
pub fn checkout(
    conn: &mut Connection,
    session: Session,
    journal: &Journal,
    items: &[(i64, u32)],
    payment: Option<PaymentMethod>,
    now: NaiveDateTime,
) -> Result<FinalizeOutcome> {
    let mut co = Checkout::open(conn, session)?;
    for (id, taps) in items {
        for _ in 0..*taps {
            co.add(*id)
                .with_context(|| format!("Could not add product #{} to the cart", id))?;
        }
    }
    if let Some(p) = payment {
        co.set_payment(p);
    }
    Ok(co.finalize(conn, journal, now)?)
}

fn print_outcome<W: Write>(out: &mut W, o: &FinalizeOutcome) -> Result<()> {
    let rows: Vec<Vec<String>> = o
        .sale
        .items
        .iter()
        .map(|i| {
            vec![
                i.name.clone(),
                i.quantity.to_string(),
                i.sell_price.to_string(),
                i.line_total().to_string(),
            ]
        })
        .collect();
    writeln!(out, "{}", pretty_table(&["Product", "Qty", "Price", "Subtotal"], rows))?;
    writeln!(
        out,
        "Sale #{} recorded on {}: R$ {:.2} via {}",
        o.sale.id,
        o.sale.display_date(),
        o.sale.total_amount,
        o.sale.payment_method.label()
    )?;
    if o.replayed {
        writeln!(out, "(already recorded by a previous attempt, stock not changed again)")?;
    }
    if !o.mirrored {
        writeln!(out, "warning: sale not copied to the local journal")?;
    }
    Ok(())
}

const SHELL_HELP: &str = "commands: list [text] | add ID [N] | rm ID | cart | pay METHOD | finalize | help | quit";

/// Line-oriented cart. Errors are printed and the loop goes on with the cart untouched.
pub fn run_shell<R: BufRead, W: Write>(
    conn: &mut Connection,
    session: Session,
    journal: &Journal,
    input: R,
    mut out: W,
) -> Result<()> {
    let mut co = Checkout::open(conn, session)?;
    writeln!(out, "{}", SHELL_HELP)?;
    for line in input.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();
        match cmd {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", SHELL_HELP)?,
            "list" => {
                let term = args.join(" ").to_lowercase();
                let rows: Vec<Vec<String>> = co
                    .products()
                    .iter()
                    .filter(|p| p.name.to_lowercase().contains(&term))
                    .map(|p| {
                        vec![
                            p.id.to_string(),
                            p.name.clone(),
                            p.sell_price.to_string(),
                            p.quantity.to_string(),
                        ]
                    })
                    .collect();
                writeln!(out, "{}", pretty_table(&["ID", "Name", "Price", "Available"], rows))?;
            }
            "add" => {
                let Some(id) = args.first().and_then(|s| s.parse::<i64>().ok()) else {
                    writeln!(out, "usage: add ID [N]")?;
                    continue;
                };
                let taps = args.get(1).and_then(|s| s.parse::<u32>().ok()).unwrap_or(1);
                let in_cart = co.cart().get(id).map(|l| l.quantity).unwrap_or(0);
                let room = co
                    .find_product(id)
                    .map(|p| (p.quantity - in_cart).max(0))
                    .unwrap_or(0);
                // one tap past the room reports the stock error
                for _ in 0..i64::from(taps).min(room + 1) {
                    if let Err(e) = co.add(id) {
                        writeln!(out, "error: {}", e)?;
                        break;
                    }
                }
                writeln!(out, "total: {}", co.total())?;
            }
            "rm" => match args.first().and_then(|s| s.parse::<i64>().ok()) {
                Some(id) if co.remove(id).is_some() => writeln!(out, "total: {}", co.total())?,
                _ => writeln!(out, "not in cart")?,
            },
            "cart" => {
                let rows: Vec<Vec<String>> = co
                    .cart()
                    .lines()
                    .iter()
                    .map(|l| {
                        vec![
                            l.product.id.to_string(),
                            l.product.name.clone(),
                            l.quantity.to_string(),
                            l.line_total().to_string(),
                        ]
                    })
                    .collect();
                writeln!(out, "{}", pretty_table(&["ID", "Name", "Qty", "Subtotal"], rows))?;
                let payment = co
                    .payment()
                    .map(|p| p.label().to_string())
                    .unwrap_or_else(|| "not selected".to_string());
                writeln!(out, "total: {}  payment: {}", co.total(), payment)?;
            }
            "pay" => match args.join(" ").parse::<PaymentMethod>() {
                Ok(p) => {
                    co.set_payment(p);
                    writeln!(out, "payment: {}", p.label())?;
                }
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            "finalize" => {
                let now = chrono::Local::now().naive_local();
                match co.finalize(conn, journal, now) {
                    Ok(o) => print_outcome(&mut out, &o)?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            }
            other => writeln!(out, "unknown command '{}'; {}", other, SHELL_HELP)?,
        }
    }
    Ok(())
}
