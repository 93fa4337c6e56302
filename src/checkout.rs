// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sale registration: a cart built against the last product snapshot, and the
//! finalize sequence that records the sale and decrements stock in a single
//! database transaction before mirroring it to the local journal.
//!
//! ```text
//! Idle -> Validating -> Persisting -> Reconciling -> Mirroring -> Idle
//!            |              |              |
//!            +--------------+--------------+---> Idle (error, cart kept)
//! ```
//!
//! Every checkout carries an idempotency key that survives failed attempts and
//! is only replaced after a successful finalize. If a previous attempt already
//! committed (and a later step failed), retrying finds that sale by key and
//! does not record it twice. A stored sale whose items or payment differ from
//! the current cart is refused with `AlreadyRecorded` and the key is replaced,
//! so the next finalize records the cart as a new sale.

use crate::cart::{Cart, CartLine};
use crate::currency::Money;
use crate::errors::{Error, Result};
use crate::journal::Journal;
use crate::models::{PaymentMethod, Product, Sale, SaleItem};
use crate::products::list_products;
use crate::reconcile::{StockUpdate, reconcile};
use crate::sales::{find_by_key, insert_sale};
use crate::session::Session;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    Persisting,
    Reconciling,
    Mirroring,
}

#[derive(Debug, Clone)]
pub struct FinalizeOutcome {
    pub sale: Sale,
    /// False when the journal could not be written; the sale itself is committed.
    pub mirrored: bool,
    /// True when the sale had already been committed by an earlier attempt.
    pub replayed: bool,
}

#[derive(Debug)]
pub struct Checkout {
    session: Session,
    products: Vec<Product>,
    cart: Cart,
    payment: Option<PaymentMethod>,
    key: Uuid,
    stage: Stage,
}

impl Checkout {
    /// Starts a sale with a fresh product snapshot.
    pub fn open(conn: &Connection, session: Session) -> Result<Self> {
        let products = list_products(conn, &session)?;
        Ok(Checkout {
            session,
            products,
            cart: Cart::new(),
            payment: None,
            key: Uuid::new_v4(),
            stage: Stage::Idle,
        })
    }

    pub fn refresh_products(&mut self, conn: &Connection) -> Result<()> {
        self.products = list_products(conn, &self.session)?;
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find_product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn add(&mut self, product_id: i64) -> Result<&CartLine> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(Error::ProductNotFound(product_id))?;
        self.cart.add(product)
    }

    pub fn remove(&mut self, product_id: i64) -> Option<CartLine> {
        self.cart.remove(product_id)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn set_payment(&mut self, method: PaymentMethod) {
        self.payment = Some(method);
    }

    pub fn payment(&self) -> Option<PaymentMethod> {
        self.payment
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn idempotency_key(&self) -> Uuid {
        self.key
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = ?self.stage, to = ?stage, key = %self.key, "checkout stage");
        self.stage = stage;
    }

    /// Records the sale, adjusts stock, mirrors to `journal` and resets the checkout.
    /// On error the cart and payment method are left as they were.
    pub fn finalize(
        &mut self,
        conn: &mut Connection,
        journal: &Journal,
        now: NaiveDateTime,
    ) -> Result<FinalizeOutcome> {
        let result = self.run(conn, journal, now);
        self.enter(Stage::Idle);
        match result {
            Ok(outcome) => {
                self.cart.clear();
                self.payment = None;
                self.key = Uuid::new_v4();
                if let Err(e) = self.refresh_products(conn) {
                    warn!("sale {} recorded but products could not be reloaded: {}", outcome.sale.id, e);
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!("finalize failed: {}", e);
                if matches!(
                    e,
                    Error::StaleSnapshot { .. }
                        | Error::AlreadyRecorded { .. }
                        | Error::ProductNotFound(_)
                        | Error::StockCeilingExceeded { .. }
                ) {
                    if let Err(re) = self.refresh_products(conn) {
                        warn!("could not reload products: {}", re);
                    }
                }
                Err(e)
            }
        }
    }

    fn run(
        &mut self,
        conn: &mut Connection,
        journal: &Journal,
        now: NaiveDateTime,
    ) -> Result<FinalizeOutcome> {
        self.enter(Stage::Validating);
        if self.cart.is_empty() {
            return Err(Error::EmptyCart);
        }
        let payment = self.payment.ok_or(Error::NoPaymentMethod)?;

        let updates = reconcile(&self.products, &self.cart);
        if let Some(missing) = self
            .cart
            .lines()
            .iter()
            .find(|l| !updates.iter().any(|u| u.product_id == l.product.id))
        {
            return Err(Error::ProductNotFound(missing.product.id));
        }
        let items: Vec<SaleItem> = self.cart.lines().iter().map(CartLine::to_sale_item).collect();

        self.enter(Stage::Persisting);
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing = find_by_key(&tx, &self.session, self.key)?;
        let (sale, replayed) = match existing {
            Some(existing) => {
                drop(tx);
                if existing.items != items || existing.payment_method != payment {
                    // the cart changed after that attempt; it is a different sale
                    self.key = Uuid::new_v4();
                    return Err(Error::AlreadyRecorded {
                        sale_id: existing.id,
                    });
                }
                info!(sale_id = existing.id, "sale already recorded by an earlier attempt");
                (existing, true)
            }
            None => {
                let sale = insert_sale(&tx, &self.session, self.key, payment, now, &items)?;
                self.enter(Stage::Reconciling);
                apply_stock_updates(&tx, &self.session, &updates, &self.cart)?;
                tx.commit()?;
                info!(
                    sale_id = sale.id,
                    total = %sale.total_amount,
                    payment = %payment,
                    lines = sale.items.len(),
                    "sale recorded"
                );
                (sale, false)
            }
        };

        self.enter(Stage::Mirroring);
        let mirrored = match journal.append(&sale) {
            Ok(_) => true,
            Err(e) => {
                warn!("sale {} not mirrored to {}: {}", sale.id, journal.path().display(), e);
                false
            }
        };

        Ok(FinalizeOutcome {
            sale,
            mirrored,
            replayed,
        })
    }
}

/// Applies `updates` only if every product still holds the quantity the cart
/// was built against.
fn apply_stock_updates(
    conn: &Connection,
    session: &Session,
    updates: &[StockUpdate],
    cart: &Cart,
) -> Result<()> {
    for u in updates {
        let name = cart
            .get(u.product_id)
            .map(|l| l.product.name.clone())
            .unwrap_or_else(|| u.product_id.to_string());
        let actual: i64 = conn
            .query_row(
                "SELECT quantity FROM products WHERE id=?1 AND user_id=?2",
                params![u.product_id, session.user_id()],
                |r| r.get(0),
            )
            .optional()?
            .ok_or(Error::ProductNotFound(u.product_id))?;
        if actual != u.expected {
            return Err(Error::StaleSnapshot {
                product: name,
                expected: u.expected,
                actual,
            });
        }
        if u.new_quantity < 0 {
            return Err(Error::StockCeilingExceeded {
                product: name,
                available: actual,
            });
        }
        conn.execute(
            "UPDATE products SET quantity=?1 WHERE id=?2 AND user_id=?3",
            params![u.new_quantity, u.product_id, session.user_id()],
        )?;
        debug!(product_id = u.product_id, from = actual, to = u.new_quantity, "stock adjusted");
    }
    Ok(())
}
