//! User accounts and their zero-initialized stats rows.

use super::{now_ms, Database};
use crate::error::ServiceError;
use crate::types::User;
use anyhow::Result;
use rusqlite::{params, Connection, Row};
use tracing::debug;

fn parse_user_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        created_at: row.get("created_at")?,
    })
}

fn get_user_internal(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, username, created_at FROM users WHERE id = ?1")?;

    match stmt.query_row(params![user_id], parse_user_row) {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Create a user account.
    ///
    /// The stats row is inserted in the same transaction, so every account
    /// always has exactly one zero-initialized aggregate row.
    pub fn create_user(&self, username: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ServiceError::missing_field("username").into());
        }

        let now = now_ms();

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO users (username, created_at) VALUES (?1, ?2)",
                params![username, now],
            )?;
            let user_id = tx.last_insert_rowid();

            tx.execute(
                "INSERT INTO user_stats (user_id, created_at, updated_at) VALUES (?1, ?2, ?2)",
                params![user_id, now],
            )?;

            tx.commit()?;

            debug!(user_id, username, "user created");
            Ok(User {
                id: user_id,
                username: username.to_string(),
                created_at: now,
            })
        })
    }

    /// Get a user by id.
    pub fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| get_user_internal(conn, user_id))
    }

    /// Look up a user by username (the CLI resolves principals with this).
    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, username, created_at FROM users WHERE username = ?1")?;

            match stmt.query_row(params![username], parse_user_row) {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }
}
