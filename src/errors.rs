// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cart is empty, add products before finalizing the sale")]
    EmptyCart,

    #[error("Select a payment method before finalizing the sale")]
    NoPaymentMethod,

    #[error("No user is logged in, run `pdv login` first")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Product '{0}' is not available for sale (out of stock)")]
    OutOfStock(String),

    #[error("Maximum available quantity reached for '{product}' ({available} in stock)")]
    StockCeilingExceeded { product: String, available: i64 },

    #[error("Stock for '{product}' changed since it was loaded ({expected} -> {actual}), review the cart and retry")]
    StaleSnapshot {
        product: String,
        expected: i64,
        actual: i64,
    },

    #[error("Sale #{sale_id} was already recorded for this checkout with other items, review the cart and finalize again")]
    AlreadyRecorded { sale_id: i64 },

    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Journal I/O error: {0}")]
    Journal(#[from] std::io::Error),

    #[error("Journal format error: {0}")]
    JournalFormat(#[from] serde_json::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl Error {
    /// Validation and stock errors leave no side effects and are fixed by the user.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Error::EmptyCart
                | Error::NoPaymentMethod
                | Error::Unauthenticated
                | Error::InvalidCredentials
                | Error::Validation(_)
                | Error::OutOfStock(_)
                | Error::StockCeilingExceeded { .. }
                | Error::StaleSnapshot { .. }
                | Error::AlreadyRecorded { .. }
                | Error::ProductNotFound(_)
                | Error::InvalidAmount(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
