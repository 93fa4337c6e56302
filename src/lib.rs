// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cart;
pub mod checkout;
pub mod cli;
pub mod commands;
pub mod config;
pub mod currency;
pub mod db;
pub mod errors;
pub mod journal;
pub mod models;
pub mod products;
pub mod reconcile;
pub mod sales;
pub mod session;
pub mod utils;
