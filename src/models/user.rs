//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::models::PasswordHash;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to
/// better compile time errors, and more flexible generics that can have
/// distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application, as seen by everything above the stores.
///
/// This type never carries the password digest. The store-level row that
/// does is [UserRecord].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The unique name the user registered with. Matching is case-sensitive.
    pub username: String,
    /// The user's email address. May be empty.
    pub email: String,
}

/// A full user row from the database, including the password digest.
///
/// Only the stores and [AuthService](crate::services::AuthService) handle
/// this type; convert it to a [User] before handing it to anything that
/// displays it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The unique name the user registered with.
    pub username: String,
    /// The user's email address. May be empty.
    pub email: String,
    /// The salted digest of the user's password.
    pub password_hash: PasswordHash,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
        }
    }
}
