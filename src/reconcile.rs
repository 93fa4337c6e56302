// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cart::Cart;
use crate::models::Product;
use std::collections::HashMap;

/// New on-hand quantity for one product after a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockUpdate {
    pub product_id: i64,
    /// Quantity in the snapshot the cart was built against.
    pub expected: i64,
    pub new_quantity: i64,
}

/// Pairs each cart line with its product in `products`, in cart order.
/// Lines whose product is no longer in the snapshot are skipped.
pub fn reconcile(products: &[Product], cart: &Cart) -> Vec<StockUpdate> {
    let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();
    cart.lines()
        .iter()
        .filter_map(|line| {
            let p = by_id.get(&line.product.id)?;
            Some(StockUpdate {
                product_id: p.id,
                expected: p.quantity,
                new_quantity: p.quantity - line.quantity,
            })
        })
        .collect()
}
