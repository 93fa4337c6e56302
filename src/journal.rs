// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! On-device copy of finalized sales for offline viewing. Never read back
//! to drive stock changes.

use crate::errors::Result;
use crate::models::Sale;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Journal { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty journal.
    pub fn load(&self) -> Result<Vec<Sale>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Rewrites the whole list with `sale` appended. Returns false when a record with
    /// the same idempotency key is already there.
    pub fn append(&self, sale: &Sale) -> Result<bool> {
        let mut sales = self.load()?;
        if sales
            .iter()
            .any(|s| s.idempotency_key == sale.idempotency_key)
        {
            return Ok(false);
        }
        sales.push(sale.clone());
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&sales)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(true)
    }
}
