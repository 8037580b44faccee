//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    models::{PasswordHash, UserID, UserRecord},
    stores::UserStore,
};

/// Handles the creation and retrieval of user rows in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<UserRecord, rusqlite::Error> {
        let raw_id = row.get(0)?;
        let username = row.get(1)?;
        let email = row.get(2)?;
        let raw_password_hash: String = row.get(3)?;

        Ok(UserRecord {
            id: UserID::new(raw_id),
            username,
            email,
            password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        })
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateUsername] if `username` is already
    /// registered, or [Error::SqlError] if an SQL related error occurred.
    fn create(
        &mut self,
        username: &str,
        email: &str,
        password_hash: PasswordHash,
    ) -> Result<UserRecord, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)",
            (username, email, password_hash.as_ref()),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(UserRecord {
            id,
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash,
        })
    }

    /// Get the user with the specified `username`, or return
    /// [Error::NotFound] if no such user exists.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    fn get_by_username(&self, username: &str) -> Result<UserRecord, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, username, email, password FROM users WHERE username = :username")?
            .query_row(&[(":username", username)], Self::map_row)
            .map_err(|error| error.into())
    }
}
