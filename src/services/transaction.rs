//! The create, list, update and delete workflows for transactions.

use time::PrimitiveDateTime;

use crate::{
    DatabaseID,
    models::{Transaction, UserID},
    stores::TransactionStore,
};

/// The fields of a transaction that
/// [TransactionService::update_transaction] may change.
///
/// A field left as [None] keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement amount.
    pub amount: Option<f64>,
    /// Replacement category.
    pub category: Option<String>,
    /// Replacement date.
    pub date: Option<PrimitiveDateTime>,
}

/// Provides the transaction workflows over a [TransactionStore].
///
/// The caller passes the owning user's ID into every call; the service
/// keeps no notion of a current user.
#[derive(Debug, Clone)]
pub struct TransactionService<T> {
    transaction_store: T,
}

impl<T: TransactionStore> TransactionService<T> {
    /// Create a new transaction service on top of `transaction_store`.
    pub fn new(transaction_store: T) -> Self {
        Self { transaction_store }
    }

    /// Record a new transaction for `user_id` and return it.
    ///
    /// `date` defaults to the current local date-time when [None]. Returns
    /// [None] if the description is blank or the row could not be created;
    /// the cause is logged, not returned.
    pub fn add_transaction(
        &mut self,
        user_id: UserID,
        description: &str,
        amount: f64,
        category: &str,
        date: Option<PrimitiveDateTime>,
    ) -> Option<Transaction> {
        if description.trim().is_empty() {
            tracing::info!("transaction rejected: blank description");
            return None;
        }

        let builder = Transaction::build(user_id, description, amount, category);
        let builder = match date {
            Some(date) => builder.date(date),
            None => builder,
        };

        match self.transaction_store.create(builder) {
            Ok(transaction) => {
                tracing::info!(
                    "transaction added: {} (${:.2})",
                    transaction.description,
                    transaction.amount
                );
                Some(transaction)
            }
            Err(error) => {
                tracing::error!("failed to add transaction {description}: {error}");
                None
            }
        }
    }

    /// All transactions belonging to `user_id`, most recent first.
    ///
    /// Returns an empty list on a store error; the cause is logged.
    pub fn list_transactions(&self, user_id: UserID) -> Vec<Transaction> {
        match self.transaction_store.get_by_user(user_id) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::error!("failed to list transactions for user {user_id}: {error}");
                Vec::new()
            }
        }
    }

    /// Apply `update` to the transaction `id`, keeping the stored value of
    /// every field the update leaves out.
    ///
    /// This is a read-modify-write: the current row is fetched, merged with
    /// `update` and written back in full. Returns `false` when the id does
    /// not exist or the store fails; the cause is logged.
    pub fn update_transaction(&mut self, id: DatabaseID, update: TransactionUpdate) -> bool {
        let current = match self.transaction_store.get(id) {
            Ok(transaction) => transaction,
            Err(error) => {
                tracing::error!("failed to update transaction {id}: {error}");
                return false;
            }
        };

        let description = update.description.unwrap_or(current.description);
        let amount = update.amount.unwrap_or(current.amount);
        let category = update.category.unwrap_or(current.category);
        let date = update.date.unwrap_or(current.date);

        match self
            .transaction_store
            .update(id, &description, amount, &category, date)
        {
            Ok(()) => {
                tracing::info!("transaction updated: {id}");
                true
            }
            Err(error) => {
                tracing::error!("failed to update transaction {id}: {error}");
                false
            }
        }
    }

    /// Delete the transaction `id`.
    ///
    /// Returns `false` when the id does not exist or the store fails; the
    /// cause is logged.
    pub fn delete_transaction(&mut self, id: DatabaseID) -> bool {
        match self.transaction_store.delete(id) {
            Ok(()) => {
                tracing::info!("transaction deleted: {id}");
                true
            }
            Err(error) => {
                tracing::error!("failed to delete transaction {id}: {error}");
                false
            }
        }
    }
}

#[cfg(test)]
mod transaction_service_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        models::{PasswordHash, UserID},
        stores::UserStore,
        stores::sqlite::{SQLiteTransactionStore, SQLiteUserStore},
    };

    use super::{TransactionService, TransactionUpdate};

    fn get_service_with_user() -> (TransactionService<SQLiteTransactionStore>, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let connection = Arc::new(Mutex::new(connection));
        let test_user = SQLiteUserStore::new(connection.clone())
            .create("alice", "a@x.com", PasswordHash::new_unchecked("hunter2"))
            .unwrap();

        (
            TransactionService::new(SQLiteTransactionStore::new(connection)),
            test_user.id,
        )
    }

    #[test]
    fn add_transaction_defaults_date_to_now() {
        let (mut service, user_id) = get_service_with_user();
        let before = crate::models::now_local();

        let transaction = service
            .add_transaction(user_id, "Coffee", -4.5, "Food", None)
            .unwrap();

        let after = crate::models::now_local();
        assert!(transaction.date >= before && transaction.date <= after);
    }

    #[test]
    fn add_transaction_rejects_blank_description() {
        let (mut service, user_id) = get_service_with_user();

        assert!(
            service
                .add_transaction(user_id, "   ", -4.5, "Food", None)
                .is_none()
        );
    }

    #[test]
    fn add_transaction_fails_on_unknown_user() {
        let (mut service, user_id) = get_service_with_user();

        let result = service.add_transaction(
            UserID::new(user_id.as_i64() + 1),
            "Coffee",
            -4.5,
            "Food",
            None,
        );

        assert!(result.is_none());
    }

    #[test]
    fn list_transactions_returns_empty_vec_for_new_user() {
        let (service, user_id) = get_service_with_user();

        assert!(service.list_transactions(user_id).is_empty());
    }

    #[test]
    fn update_with_only_category_keeps_other_fields() {
        let (mut service, user_id) = get_service_with_user();
        let date = datetime!(2025-03-14 08:30:00);
        let transaction = service
            .add_transaction(user_id, "Coffee", -4.5, "Food", Some(date))
            .unwrap();

        let updated = service.update_transaction(
            transaction.id,
            TransactionUpdate {
                category: Some("Entertainment".to_string()),
                ..Default::default()
            },
        );
        assert!(updated);

        let transactions = service.list_transactions(user_id);
        let stored = &transactions[0];
        assert_eq!(stored.category, "Entertainment");
        assert_eq!(stored.description, "Coffee");
        assert_eq!(stored.amount, -4.5);
        assert_eq!(stored.date, date);
    }

    #[test]
    fn update_fails_on_missing_id() {
        let (mut service, _user_id) = get_service_with_user();

        assert!(!service.update_transaction(999, TransactionUpdate::default()));
    }

    #[test]
    fn delete_transaction_removes_it_from_listing() {
        let (mut service, user_id) = get_service_with_user();
        let transaction = service
            .add_transaction(user_id, "Coffee", -4.5, "Food", None)
            .unwrap();

        assert!(service.delete_transaction(transaction.id));
        assert!(service.list_transactions(user_id).is_empty());
    }

    #[test]
    fn delete_fails_on_missing_id() {
        let (mut service, _user_id) = get_service_with_user();

        assert!(!service.delete_transaction(999));
    }
}
