//! SQLite backed implementations of the store traits, and a convenience
//! function for wiring them into an [AppState].

mod transaction;
mod user;

pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::initialize,
    services::{AuthService, TransactionService},
};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteUserStore, SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by creating or migrating the
/// tables for the domain models and seeding the default categories.
///
/// # Errors
///
/// Returns an error if the database cannot be initialized. The caller must
/// treat the database as unusable in that case.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let user_store = SQLiteUserStore::new(connection.clone());
    let transaction_store = SQLiteTransactionStore::new(connection);

    Ok(AppState::new(
        AuthService::new(user_store),
        TransactionService::new(transaction_store),
    ))
}
