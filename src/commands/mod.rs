// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod cash;
pub mod doctor;
pub mod exporter;
pub mod products;
pub mod sale;
pub mod stock;
