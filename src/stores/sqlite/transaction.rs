//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, types::Type};
use time::PrimitiveDateTime;

use crate::{
    DatabaseID, Error,
    models::{DATE_TIME_FORMAT, Transaction, TransactionBuilder, UserID},
    stores::TransactionStore,
};

/// Stores transactions in a SQLite database.
///
/// Transactions reference the users table, so the schema must have been set
/// up with [initialize](crate::db::initialize) before using this store.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
        let id = row.get(0)?;
        let raw_user_id = row.get(1)?;
        let description = row.get(2)?;
        let amount = row.get(3)?;
        let category = row.get(4)?;
        let raw_date: String = row.get(5)?;

        let date = PrimitiveDateTime::parse(&raw_date, DATE_TIME_FORMAT).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error))
        })?;

        Ok(Transaction {
            id,
            user_id: UserID::new(raw_user_id),
            description,
            amount,
            category,
            date,
        })
    }
}

/// Format `date` as the text stored in the date column.
fn format_date(date: PrimitiveDateTime) -> Result<String, Error> {
    date.format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), date.to_string()))
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidForeignKey] if the builder's user ID does not
    /// refer to a registered user, or [Error::SqlError] if there is some
    /// other SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let date_text = format_date(builder.date)?;
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO transactions (user_id, description, amount, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                builder.user_id.as_i64(),
                &builder.description,
                builder.amount,
                &builder.category,
                &date_text,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Transaction {
            id,
            user_id: builder.user_id,
            description: builder.description,
            amount: builder.amount,
            category: builder.category,
            date: builder.date,
        })
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a stored
    /// transaction, or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, user_id, description, amount, category, date
                 FROM transactions WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve the transactions that belong to `user_id`, ordered by date
    /// with the most recent first.
    ///
    /// The stored date text sorts lexicographically in chronological order,
    /// so the ordering is done by the database.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, user_id, description, amount, category, date
                 FROM transactions WHERE user_id = :user_id ORDER BY date DESC",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Replace the description, amount, category and date of the transaction
    /// `id`.
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
    ) -> Result<(), Error> {
        let date_text = format_date(date)?;

        let rows_changed = self.connection.lock().unwrap().execute(
            "UPDATE transactions
             SET description = ?1, amount = ?2, category = ?3, date = ?4
             WHERE id = ?5",
            (description, amount, category, &date_text, id),
        )?;

        if rows_changed == 0 {
            return Err(Error::UpdateMissingTransaction);
        }

        Ok(())
    }

    /// Delete the transaction `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::DeleteMissingTransaction] when no row matched `id`.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_changed = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM transactions WHERE id = ?1", (id,))?;

        if rows_changed == 0 {
            return Err(Error::DeleteMissingTransaction);
        }

        Ok(())
    }
}
