//! Defines the store trait for creating and retrieving users.

use crate::{
    Error,
    models::{PasswordHash, UserRecord},
};

/// Handles the creation and retrieval of user rows.
///
/// Users are created once at registration and never updated or deleted.
pub trait UserStore {
    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateUsername] if `username` is already
    /// registered, or [Error::SqlError] if there is an unexpected SQL error.
    fn create(
        &mut self,
        username: &str,
        email: &str,
        password_hash: PasswordHash,
    ) -> Result<UserRecord, Error>;

    /// Get a user by their username. Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if no user with the given username exists.
    fn get_by_username(&self, username: &str) -> Result<UserRecord, Error>;
}
