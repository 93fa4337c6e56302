// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::session;
use anyhow::Result;
use rusqlite::Connection;

pub fn login(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let business = sub.get_one::<String>("business").map(|s| s.as_str());
    let s = session::login(conn, email, password, business, cfg.bcrypt_cost)?;
    println!(
        "Logged in as {} ({})",
        s.user.email, s.user.business_name
    );
    Ok(())
}

pub fn logout(conn: &Connection) -> Result<()> {
    session::logout(conn)?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(conn: &Connection) -> Result<()> {
    let s = session::current(conn)?;
    println!("{} ({})", s.user.email, s.user.business_name);
    Ok(())
}
