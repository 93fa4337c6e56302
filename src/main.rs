// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pdv::config::AppConfig;
use pdv::journal::Journal;
use pdv::{cli, commands, db};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cfg = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init(&cfg.db_path)?;
    let journal = Journal::at(&cfg.journal_path);

    let res = match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
            Ok(())
        }
        Some(("login", sub)) => commands::auth::login(&conn, &cfg, sub),
        Some(("logout", _)) => commands::auth::logout(&conn),
        Some(("whoami", _)) => commands::auth::whoami(&conn),
        Some(("product", sub)) => commands::products::handle(&conn, sub),
        Some(("stock", sub)) => commands::stock::handle(&conn, sub),
        Some(("sale", sub)) => commands::sale::handle(&mut conn, &journal, sub),
        Some(("cash", sub)) => commands::cash::handle(&conn, sub),
        Some(("export", sub)) => commands::exporter::handle(&conn, sub),
        Some(("doctor", _)) => commands::doctor::handle(&conn, &journal),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    if let Err(e) = &res {
        match e.downcast_ref::<pdv::errors::Error>() {
            Some(pe) if pe.is_user_correctable() => tracing::debug!("rejected: {}", pe),
            _ => tracing::error!("{:#}", e),
        }
    }
    res
}
