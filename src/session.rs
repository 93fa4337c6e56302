// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local sign-in. The active user is remembered in `settings`, and every
//! data-access call receives the resulting [`Session`] explicitly.

use crate::errors::{Error, Result};
use crate::models::UserProfile;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

const SESSION_KEY: &str = "session_user_id";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserProfile,
}

impl Session {
    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

/// Signs in, creating the account and business profile on first use of an email.
pub fn login(
    conn: &Connection,
    email: &str,
    password: &str,
    business_name: Option<&str>,
    bcrypt_cost: u32,
) -> Result<Session> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::Validation(format!("invalid email '{}'", email)));
    }
    if password.is_empty() {
        return Err(Error::Validation("password must not be empty".into()));
    }

    let existing: Option<(i64, String, String)> = conn
        .query_row(
            "SELECT id, password_hash, business_name FROM users WHERE email=?1",
            params![&email],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;

    let user = match existing {
        Some((id, hash, business)) => {
            if !bcrypt::verify(password, &hash)? {
                return Err(Error::InvalidCredentials);
            }
            UserProfile {
                id,
                email,
                business_name: business,
            }
        }
        None => {
            let business = business_name.map(str::trim).unwrap_or_default();
            if business.is_empty() {
                return Err(Error::Validation(
                    "business name is required on first login".into(),
                ));
            }
            let hash = bcrypt::hash(password, bcrypt_cost)?;
            conn.execute(
                "INSERT INTO users(email, password_hash, business_name) VALUES (?1, ?2, ?3)",
                params![&email, hash, business],
            )?;
            let id = conn.last_insert_rowid();
            info!(user_id = id, "created user profile");
            UserProfile {
                id,
                email,
                business_name: business.to_string(),
            }
        }
    };

    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![SESSION_KEY, user.id.to_string()],
    )?;
    info!(user_id = user.id, "logged in");
    Ok(Session { user })
}

/// The logged-in user, or [`Error::Unauthenticated`].
pub fn current(conn: &Connection) -> Result<Session> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![SESSION_KEY],
            |r| r.get(0),
        )
        .optional()?;
    let Some(id) = raw.and_then(|v| v.parse::<i64>().ok()) else {
        return Err(Error::Unauthenticated);
    };
    let user = conn
        .query_row(
            "SELECT id, email, business_name FROM users WHERE id=?1",
            params![id],
            |r| {
                Ok(UserProfile {
                    id: r.get(0)?,
                    email: r.get(1)?,
                    business_name: r.get(2)?,
                })
            },
        )
        .optional()?
        .ok_or(Error::Unauthenticated)?;
    Ok(Session { user })
}

pub fn logout(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![SESSION_KEY])?;
    info!("logged out");
    Ok(())
}
