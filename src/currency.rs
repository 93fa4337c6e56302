// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Brazilian real amounts. Arithmetic is done on integer cents; the
//! `"R$ 12,34"` form only exists at the input/display boundary.

use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

pub const CURRENCY_PREFIX: &str = "R$ ";

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:R\$\s*)?(\d+)(?:[,.](\d{1,2}))?\s*$").expect("static regex")
});

/// An amount of money in cents. Serializes as its display form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    pub fn checked_mul(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

/// Largest price a product may carry: R$ 100.000.000,00.
pub const MAX_PRICE: Money = Money(10_000_000_000);

// The operators saturate. Paths that store amounts use the checked_* forms.
impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Mul<i64> for Money {
    type Output = Money;
    fn mul(self, qty: i64) -> Money {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        parse_currency(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}{},{:02}", sign, CURRENCY_PREFIX, abs / 100, abs % 100)
    }
}

/// Re-derives the display string from every digit typed so far, cents first.
///
/// `"1"` is `R$ 0,01`, `"1234"` is `R$ 12,34`; anything that is not a digit is
/// dropped, so feeding back a formatted value yields the same value.
pub fn format_currency(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_start_matches('0');
    let (int_part, frac_part) = if digits.len() > 2 {
        digits.split_at(digits.len() - 2)
    } else {
        ("", digits)
    };
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    format!("{}{},{:0>2}", CURRENCY_PREFIX, int_part, frac_part)
}

/// Parses `"R$ 12,34"`, `"12,34"`, `"12.3"` or `"12"` into cents.
pub fn parse_currency(s: &str) -> Result<Money> {
    let caps = AMOUNT_RE
        .captures(s)
        .ok_or_else(|| Error::InvalidAmount(s.to_string()))?;
    let int: i64 = caps[1]
        .parse()
        .map_err(|_| Error::InvalidAmount(s.to_string()))?;
    let frac: i64 = match caps.get(2) {
        Some(m) if m.as_str().len() == 1 => m.as_str().parse::<i64>().unwrap_or(0) * 10,
        Some(m) => m.as_str().parse().unwrap_or(0),
        None => 0,
    };
    int.checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .map(Money)
        .ok_or_else(|| Error::InvalidAmount(s.to_string()))
}

/// Turns raw keyboard digits into an amount, the way the price fields behave.
pub fn money_from_input(raw: &str) -> Result<Money> {
    parse_currency(&format_currency(raw))
}
