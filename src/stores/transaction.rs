//! Defines the store trait for transaction rows.

use time::PrimitiveDateTime;

use crate::{
    DatabaseID, Error,
    models::{Transaction, TransactionBuilder, UserID},
};

/// Handles the creation, retrieval, update and deletion of transaction rows.
pub trait TransactionStore {
    /// Create a new transaction and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidForeignKey] if the builder's user ID does not
    /// refer to a registered user, or [Error::SqlError] if there is an
    /// unexpected SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a transaction by its `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a stored
    /// transaction.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error>;

    /// Retrieve all transactions belonging to `user_id`, most recent first.
    ///
    /// A user with no transactions yields an empty vector, not an error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Replace the four mutable fields of the transaction `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::UpdateMissingTransaction] when no row matched `id`.
    fn update(
        &mut self,
        id: DatabaseID,
        description: &str,
        amount: f64,
        category: &str,
        date: PrimitiveDateTime,
    ) -> Result<(), Error>;

    /// Delete the transaction `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::DeleteMissingTransaction] when no row matched `id`.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
