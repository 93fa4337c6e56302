// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::Money;
use crate::errors::{Error, Result};
use crate::models::{Product, SaleItem};
use serde::Serialize;

/// One product in an in-progress sale. `product` is the snapshot taken when it was
/// first added; its `quantity` is the on-hand stock at that time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.product.sell_price * self.quantity
    }

    pub fn to_sale_item(&self) -> SaleItem {
        SaleItem {
            product_id: self.product.id,
            name: self.product.name.clone(),
            buy_price: self.product.buy_price,
            sell_price: self.product.sell_price,
            category: self.product.category,
            quantity: self.quantity,
        }
    }
}

/// Lines keyed by product id, kept in the order they were first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// One tap on a product: adds a line or bumps it by one, up to the stock on hand.
    pub fn add(&mut self, product: &Product) -> Result<&CartLine> {
        if product.quantity <= 0 {
            return Err(Error::OutOfStock(product.name.clone()));
        }
        match self.lines.iter().position(|l| l.product.id == product.id) {
            Some(idx) => {
                let line = &self.lines[idx];
                if line.quantity + 1 > product.quantity {
                    return Err(Error::StockCeilingExceeded {
                        product: product.name.clone(),
                        available: product.quantity,
                    });
                }
                let (price, quantity) = (line.product.sell_price, line.quantity + 1);
                self.check_total(product.id, price, quantity)?;
                self.lines[idx].quantity = quantity;
                Ok(&self.lines[idx])
            }
            None => {
                self.check_total(product.id, product.sell_price, 1)?;
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity: 1,
                });
                Ok(&self.lines[self.lines.len() - 1])
            }
        }
    }

    /// Fails with [`Error::InvalidAmount`] if setting `product_id`'s line to
    /// `quantity` would make the cart total overflow.
    fn check_total(&self, product_id: i64, price: Money, quantity: i64) -> Result<()> {
        let others = self
            .lines
            .iter()
            .filter(|l| l.product.id != product_id)
            .try_fold(Money::ZERO, |acc, l| {
                acc.checked_add(l.product.sell_price.checked_mul(l.quantity)?)
            });
        others
            .and_then(|acc| acc.checked_add(price.checked_mul(quantity)?))
            .map(|_| ())
            .ok_or_else(|| Error::InvalidAmount(format!("{} x {}", price, quantity)))
    }

    pub fn remove(&mut self, product_id: i64) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.product.id == product_id)?;
        Some(self.lines.remove(idx))
    }

    pub fn get(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Always derived from the current lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
