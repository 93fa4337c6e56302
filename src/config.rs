// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{Error, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// `ProjectDirs` qualifier, organization and application.
pub static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.pdv", "Pdv", "pdv"));

pub const CONFIG_FILE: &str = "pdv.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub journal_path: PathBuf,
    pub log_level: String,
    pub bcrypt_cost: u32,
}

/// Optional overrides read from `pdv.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    db_path: Option<PathBuf>,
    journal_path: Option<PathBuf>,
    log_level: Option<String>,
    bcrypt_cost: Option<u32>,
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .ok_or_else(|| Error::Config("could not determine platform-specific data dir".into()))?;
    Ok(proj.data_dir().to_path_buf())
}

impl AppConfig {
    pub fn defaults_in(dir: &Path) -> Self {
        AppConfig {
            db_path: dir.join("pdv.sqlite"),
            journal_path: dir.join("sales_journal.json"),
            log_level: "warn".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Defaults, then `pdv.toml` in the data dir, then `PDV_*` environment variables.
    pub fn load() -> Result<Self> {
        let dir = data_dir()?;
        let mut cfg = AppConfig::defaults_in(&dir);
        let file = dir.join(CONFIG_FILE);
        if file.exists() {
            cfg.apply_file(&file)?;
        }
        cfg.apply_env(|k| env::var(k).ok())?;
        Ok(cfg)
    }

    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        tracing::debug!("loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {:?}: {}", path, e)))?;
        let fc: FileConfig = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse TOML in {:?}: {}", path, e)))?;
        if let Some(p) = fc.db_path {
            self.db_path = p;
        }
        if let Some(p) = fc.journal_path {
            self.journal_path = p;
        }
        if let Some(l) = fc.log_level {
            self.log_level = l;
        }
        if let Some(c) = fc.bcrypt_cost {
            self.bcrypt_cost = check_cost(c)?;
        }
        Ok(())
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(p) = lookup("PDV_DB_PATH") {
            self.db_path = PathBuf::from(p);
        }
        if let Some(p) = lookup("PDV_JOURNAL_PATH") {
            self.journal_path = PathBuf::from(p);
        }
        if let Some(l) = lookup("PDV_LOG") {
            self.log_level = l;
        }
        if let Some(c) = lookup("PDV_BCRYPT_COST") {
            let cost = c
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::Config(format!("PDV_BCRYPT_COST '{}' is not a number", c)))?;
            self.bcrypt_cost = check_cost(cost)?;
        }
        Ok(())
    }
}

fn check_cost(cost: u32) -> Result<u32> {
    if (4..=31).contains(&cost) {
        Ok(cost)
    } else {
        Err(Error::Config(format!("bcrypt cost {} outside 4..=31", cost)))
    }
}
