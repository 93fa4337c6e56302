// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pdv::config::AppConfig;
use pdv::errors::Error;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn defaults_live_in_the_data_dir() {
    let cfg = AppConfig::defaults_in(Path::new("/data/pdv"));
    assert_eq!(cfg.db_path, PathBuf::from("/data/pdv/pdv.sqlite"));
    assert_eq!(cfg.journal_path, PathBuf::from("/data/pdv/sales_journal.json"));
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.bcrypt_cost, bcrypt::DEFAULT_COST);
}

#[test]
fn env_overrides_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("pdv.toml");
    std::fs::write(
        &file,
        "db_path = \"/srv/loja.sqlite\"\nlog_level = \"debug\"\nbcrypt_cost = 6\n",
    )
    .unwrap();

    let mut cfg = AppConfig::defaults_in(dir.path());
    cfg.apply_file(&file).unwrap();
    assert_eq!(cfg.db_path, PathBuf::from("/srv/loja.sqlite"));
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.bcrypt_cost, 6);
    assert_eq!(cfg.journal_path, dir.path().join("sales_journal.json"));

    let env: HashMap<&str, &str> = [("PDV_LOG", "pdv=trace"), ("PDV_BCRYPT_COST", " 5 ")].into();
    cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
    assert_eq!(cfg.log_level, "pdv=trace");
    assert_eq!(cfg.bcrypt_cost, 5);
    assert_eq!(cfg.db_path, PathBuf::from("/srv/loja.sqlite"));
}

#[test]
fn bad_values_are_config_errors() {
    let dir = tempdir().unwrap();
    let mut cfg = AppConfig::defaults_in(dir.path());

    assert!(matches!(
        cfg.apply_env(|k| (k == "PDV_BCRYPT_COST").then(|| "lots".to_string())),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        cfg.apply_env(|k| (k == "PDV_BCRYPT_COST").then(|| "40".to_string())),
        Err(Error::Config(_))
    ));

    let file = dir.path().join("pdv.toml");
    std::fs::write(&file, "db_path = [").unwrap();
    assert!(matches!(cfg.apply_file(&file), Err(Error::Config(_))));
    assert_eq!(cfg.bcrypt_cost, bcrypt::DEFAULT_COST);
}

#[test]
fn data_dir_uses_the_pdv_identity() {
    assert_eq!(*pdv::config::APP, ("com.pdv", "Pdv", "pdv"));
    if let Ok(dir) = pdv::config::data_dir() {
        assert!(dir.ends_with("pdv"), "{}", dir.display());
    }
}
