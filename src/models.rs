// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::Money;
use crate::errors::Error;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Display format of a sale timestamp.
pub const SALE_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    GraosCereais,
    DocesSnacks,
    Bebidas,
    Laticinios,
    CarnesPeixes,
    FrutasVerduras,
    ProdutosLimpeza,
    HigienePessoal,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::GraosCereais,
        Category::DocesSnacks,
        Category::Bebidas,
        Category::Laticinios,
        Category::CarnesPeixes,
        Category::FrutasVerduras,
        Category::ProdutosLimpeza,
        Category::HigienePessoal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::GraosCereais => "graos_cereais",
            Category::DocesSnacks => "doces_snacks",
            Category::Bebidas => "bebidas",
            Category::Laticinios => "laticinios",
            Category::CarnesPeixes => "carnes_peixes",
            Category::FrutasVerduras => "frutas_verduras",
            Category::ProdutosLimpeza => "produtos_limpeza",
            Category::HigienePessoal => "higiene_pessoal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::GraosCereais => "Grãos e Cereais",
            Category::DocesSnacks => "Doces e Snacks",
            Category::Bebidas => "Bebidas",
            Category::Laticinios => "Laticínios",
            Category::CarnesPeixes => "Carnes e Peixes",
            Category::FrutasVerduras => "Frutas e Verduras",
            Category::ProdutosLimpeza => "Produtos de Limpeza",
            Category::HigienePessoal => "Higiene Pessoal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::Validation(format!("unknown category '{}'", needle)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    DebitCard,
    CreditCard,
    Pix,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::DebitCard,
        PaymentMethod::CreditCard,
        PaymentMethod::Pix,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Pix => "pix",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Espécie",
            PaymentMethod::DebitCard => "Cartão Débito",
            PaymentMethod::CreditCard => "Cartão Crédito",
            PaymentMethod::Pix => "Pix",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(needle) || p.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::Validation(format!("unknown payment method '{}'", needle)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub buy_price: Money,
    pub sell_price: Money,
    pub quantity: i64,
    pub location: String,
    pub category: Category,
    pub expiry_date: NaiveDate,
    pub image: Option<String>,
}

/// Fields collected by the registration form.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub buy_price: Money,
    pub sell_price: Money,
    pub quantity: i64,
    pub location: String,
    pub category: Category,
    pub expiry_date: NaiveDate,
    pub image: Option<String>,
}

/// Fields editable from the product detail view; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub buy_price: Option<Money>,
    pub sell_price: Option<Money>,
    pub quantity: Option<i64>,
    pub location: Option<String>,
}

/// Point-in-time copy of a product as it was sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: i64,
    pub name: String,
    pub buy_price: Money,
    pub sell_price: Money,
    pub category: Category,
    pub quantity: i64,
}

impl SaleItem {
    pub fn line_total(&self) -> Money {
        self.sell_price * self.quantity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub idempotency_key: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(rename = "date", with = "sale_date")]
    pub sold_at: NaiveDateTime,
    pub items: Vec<SaleItem>,
}

impl Sale {
    pub fn display_date(&self) -> String {
        self.sold_at.format(SALE_DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub business_name: String,
}

mod sale_date {
    use super::SALE_DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(SALE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, SALE_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
