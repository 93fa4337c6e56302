// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pdv::cart::Cart;
use pdv::currency::Money;
use pdv::errors::Error;
use pdv::models::{Category, Product};

fn product(id: i64, name: &str, sell: &str, quantity: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        buy_price: Money::ZERO,
        sell_price: pdv::currency::parse_currency(sell).unwrap(),
        quantity,
        location: String::new(),
        category: Category::DocesSnacks,
        expiry_date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
        image: None,
    }
}

#[test]
fn out_of_stock_is_rejected_without_change() {
    let mut cart = Cart::new();
    let p = product(1, "Chiclete", "R$ 1,00", 0);
    assert!(matches!(cart.add(&p), Err(Error::OutOfStock(_))));
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Money::ZERO);
}

#[test]
fn quantity_never_exceeds_stock() {
    let mut cart = Cart::new();
    let p = product(7, "Refrigerante", "R$ 5,50", 3);
    for expected in 1..=3 {
        let line = cart.add(&p).unwrap();
        assert_eq!(line.quantity, expected);
    }
    let err = cart.add(&p).unwrap_err();
    assert!(matches!(
        err,
        Error::StockCeilingExceeded { available: 3, .. }
    ));
    assert_eq!(cart.get(7).unwrap().quantity, 3);
    assert_eq!(cart.len(), 1);
}

#[test]
fn total_is_recomputed_after_every_mutation() {
    let mut cart = Cart::new();
    let a = product(1, "Arroz", "R$ 10,00", 5);
    let b = product(2, "Feijão", "R$ 7,35", 5);

    cart.add(&a).unwrap();
    assert_eq!(cart.total(), Money::from_cents(1000));
    cart.add(&b).unwrap();
    cart.add(&b).unwrap();
    assert_eq!(cart.total(), Money::from_cents(1000 + 2 * 735));
    cart.add(&a).unwrap();
    let expected: Money = cart.lines().iter().map(|l| l.product.sell_price * l.quantity).sum();
    assert_eq!(cart.total(), expected);

    cart.remove(1).unwrap();
    assert_eq!(cart.total(), Money::from_cents(1470));
    cart.clear();
    assert_eq!(cart.total(), Money::ZERO);
}

#[test]
fn same_name_different_ids_are_separate_lines() {
    let mut cart = Cart::new();
    let first = product(1, "Leite", "R$ 4,00", 2);
    let second = product(2, "Leite", "R$ 4,50", 2);
    cart.add(&first).unwrap();
    cart.add(&second).unwrap();
    cart.add(&second).unwrap();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.get(1).unwrap().quantity, 1);
    assert_eq!(cart.get(2).unwrap().quantity, 2);
    assert_eq!(cart.total(), Money::from_cents(400 + 900));
}

#[test]
fn lines_keep_insertion_order() {
    let mut cart = Cart::new();
    cart.add(&product(3, "C", "R$ 1,00", 1)).unwrap();
    cart.add(&product(1, "A", "R$ 1,00", 1)).unwrap();
    cart.add(&product(2, "B", "R$ 1,00", 1)).unwrap();
    let ids: Vec<i64> = cart.lines().iter().map(|l| l.product.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn total_that_would_overflow_is_rejected() {
    let mut cart = Cart::new();
    let mut bar = product(1, "Lingote", "R$ 1,00", 3);
    bar.sell_price = Money::from_cents(5_000_000_000_000_000_000);
    cart.add(&bar).unwrap();

    let err = cart.add(&bar).unwrap_err();
    assert!(matches!(err, Error::InvalidAmount(_)));
    assert_eq!(cart.get(1).unwrap().quantity, 1);
    assert_eq!(cart.total(), bar.sell_price);

    let mut other = product(2, "Barra", "R$ 1,00", 3);
    other.sell_price = Money::from_cents(5_000_000_000_000_000_000);
    assert!(matches!(cart.add(&other), Err(Error::InvalidAmount(_))));
    assert_eq!(cart.len(), 1);
}
