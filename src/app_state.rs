//! Implements the struct that bundles the application services for the UI
//! layer.

use crate::{
    services::{AuthService, TransactionService},
    stores::{TransactionStore, UserStore},
};

/// The application core handed to the UI layer.
///
/// The core keeps no session state: the UI holds the logged-in
/// [User](crate::models::User) it got back from [AuthService] and passes the
/// user's ID into every transaction call.
#[derive(Debug, Clone)]
pub struct AppState<U, T> {
    /// The registration and login workflows.
    pub auth: AuthService<U>,
    /// The transaction workflows.
    pub transactions: TransactionService<T>,
}

impl<U: UserStore, T: TransactionStore> AppState<U, T> {
    /// Create a new [AppState] from already-wired services.
    ///
    /// Most callers want
    /// [create_app_state](crate::stores::sqlite::create_app_state) instead,
    /// which also initializes the database.
    pub fn new(auth: AuthService<U>, transactions: TransactionService<T>) -> Self {
        Self { auth, transactions }
    }
}
