// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use pdv::cart::Cart;
use pdv::products::list_products;
use pdv::reconcile::{StockUpdate, reconcile};

#[test]
fn one_update_per_line_in_cart_order() {
    let (conn, s) = common::setup_logged_in();
    let a = common::add_product(&conn, &s, "Água", 250, 10);
    let b = common::add_product(&conn, &s, "Biscoito", 399, 4);
    let _c = common::add_product(&conn, &s, "Café", 1890, 2);
    let snapshot = list_products(&conn, &s).unwrap();

    let mut cart = Cart::new();
    cart.add(&b).unwrap();
    cart.add(&a).unwrap();
    cart.add(&b).unwrap();

    let updates = reconcile(&snapshot, &cart);
    assert_eq!(
        updates,
        vec![
            StockUpdate {
                product_id: b.id,
                expected: 4,
                new_quantity: 2
            },
            StockUpdate {
                product_id: a.id,
                expected: 10,
                new_quantity: 9
            },
        ]
    );
}

#[test]
fn products_missing_from_snapshot_are_skipped() {
    let (conn, s) = common::setup_logged_in();
    let a = common::add_product(&conn, &s, "Água", 250, 10);
    let gone = common::add_product(&conn, &s, "Pão", 100, 3);

    let mut cart = Cart::new();
    cart.add(&a).unwrap();
    cart.add(&gone).unwrap();

    pdv::products::delete_product(&conn, &s, gone.id).unwrap();
    let snapshot = list_products(&conn, &s).unwrap();
    let updates = reconcile(&snapshot, &cart);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].product_id, a.id);
}

#[test]
fn uses_snapshot_quantity_not_cart_copy() {
    let (conn, s) = common::setup_logged_in();
    let a = common::add_product(&conn, &s, "Água", 250, 10);
    let mut cart = Cart::new();
    cart.add(&a).unwrap();

    let mut snapshot = list_products(&conn, &s).unwrap();
    snapshot[0].quantity = 6;
    let updates = reconcile(&snapshot, &cart);
    assert_eq!(updates[0].expected, 6);
    assert_eq!(updates[0].new_quantity, 5);
}
