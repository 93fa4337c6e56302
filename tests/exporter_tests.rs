// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use pdv::checkout::Checkout;
use pdv::cli;
use pdv::commands::exporter;
use pdv::journal::Journal;
use pdv::models::{PaymentMethod, Sale};
use tempfile::tempdir;

fn two_sales(conn: &mut rusqlite::Connection, s: &pdv::session::Session, journal: &Journal) {
    let a = common::add_product(conn, s, "Broa", 350, 10);
    let b = common::add_product(conn, s, "Café, torrado", 1890, 10);
    let mut co = Checkout::open(conn, s.clone()).unwrap();
    co.add(a.id).unwrap();
    co.add(a.id).unwrap();
    co.add(b.id).unwrap();
    co.set_payment(PaymentMethod::Cash);
    co.finalize(conn, journal, common::at(2026, 10, 17, 8, 0)).unwrap();
    co.add(b.id).unwrap();
    co.set_payment(PaymentMethod::Pix);
    co.finalize(conn, journal, common::at(2026, 10, 18, 9, 15)).unwrap();
}

fn run_export(conn: &rusqlite::Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pdv", "export", "sales"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("export", sub)) => exporter::handle(conn, sub),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn csv_has_one_row_per_item_oldest_first() {
    let (mut conn, s) = common::setup_logged_in();
    let dir = tempdir().unwrap();
    let journal = Journal::at(dir.path().join("journal.json"));
    two_sales(&mut conn, &s, &journal);

    let out = dir.path().join("sales.csv");
    run_export(&conn, &["--out", out.to_str().unwrap()]).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "sale_id");
    assert_eq!(&headers[8], "sale_total");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][1], "17/10/2026 08:00");
    assert_eq!(&rows[0][2], "cash");
    assert_eq!(&rows[0][4], "Broa");
    assert_eq!(&rows[0][5], "2");
    assert_eq!(&rows[0][6], "3.50");
    assert_eq!(&rows[0][7], "7.00");
    assert_eq!(&rows[0][8], "25.90");
    assert_eq!(&rows[1][4], "Café, torrado");
    assert_eq!(&rows[2][2], "pix");
    assert_eq!(&rows[2][8], "18.90");
}

#[test]
fn json_export_matches_history() {
    let (mut conn, s) = common::setup_logged_in();
    let dir = tempdir().unwrap();
    let journal = Journal::at(dir.path().join("journal.json"));
    two_sales(&mut conn, &s, &journal);

    let out = dir.path().join("sales.json");
    run_export(&conn, &["--format", "JSON", "--out", out.to_str().unwrap()]).unwrap();
    let exported: Vec<Sale> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(exported.len(), 2);
    assert_eq!(exported[0].payment_method, PaymentMethod::Cash);
    assert_eq!(exported[1].items[0].name, "Café, torrado");
}

#[test]
fn unknown_format_is_an_error() {
    let (conn, _s) = common::setup_logged_in();
    let dir = tempdir().unwrap();
    let out = dir.path().join("sales.xml");
    let err = run_export(&conn, &["--format", "xml", "--out", out.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out.exists());
}
