//! This module creates, migrates and seeds the application's database
//! schema.
//!
//! The schema is versioned with SQLite's `user_version` pragma and evolved
//! by ordered, additive migration steps. No step deletes or rewrites
//! existing user data; databases created before versioning are detected and
//! upgraded in place.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::Error;

/// The schema version written to `user_version` after a successful
/// [initialize].
const SCHEMA_VERSION: i64 = 2;

/// The global categories every database is seeded with.
///
/// These are a starter set, not a restriction: transactions may use any
/// free-text category label.
pub const DEFAULT_CATEGORIES: [&str; 13] = [
    "Food",
    "Transportation",
    "Housing",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Education",
    "Shopping",
    "Personal",
    "Debt",
    "Savings",
    "Income",
    "Other",
];

/// Create or upgrade the application schema and seed the default
/// categories.
///
/// Idempotent: running this against an up-to-date database changes nothing.
/// All schema work happens inside one exclusive transaction, so a failure
/// rolls back without leaving a partial table set. If this function returns
/// an error the caller must treat the database as unusable and not proceed
/// to other operations.
///
/// # Errors
///
/// Returns an [Error::SqlError] if any statement fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // SQLite leaves foreign key enforcement off unless asked, and the
    // pragma is a no-op inside a transaction.
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    let version = schema_version(&transaction)?;

    if version < 1 {
        create_tables(&transaction)?;
    }

    if version < 2 {
        add_user_email_column(&transaction)?;
    }

    seed_default_categories(&transaction)?;
    transaction.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    transaction.commit()?;

    if version < SCHEMA_VERSION {
        tracing::info!("database schema upgraded from version {version} to {SCHEMA_VERSION}");
    }

    Ok(())
}

fn schema_version(transaction: &SqlTransaction) -> Result<i64, Error> {
    transaction
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|error| error.into())
}

/// Migration step 1: the base tables.
///
/// `IF NOT EXISTS` keeps the users table of a pre-versioning database in
/// place; step 2 brings its column set up to date.
fn create_tables(transaction: &SqlTransaction) -> Result<(), Error> {
    transaction.execute(
        "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                email TEXT DEFAULT '',
                password TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
        (),
    )?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (user_id) REFERENCES users (id)
                )",
        (),
    )?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                user_id INTEGER,
                FOREIGN KEY (user_id) REFERENCES users (id)
                )",
        (),
    )?;

    Ok(())
}

/// Migration step 2: add the email column to a users table created before
/// the column existed.
///
/// Existing rows get the empty-string default and keep their id, username
/// and password values unchanged.
fn add_user_email_column(transaction: &SqlTransaction) -> Result<(), Error> {
    let email_column_count: i64 = transaction.query_row(
        "SELECT COUNT(*) FROM pragma_table_info('users') WHERE name = 'email'",
        [],
        |row| row.get(0),
    )?;

    if email_column_count == 0 {
        transaction.execute("ALTER TABLE users ADD COLUMN email TEXT DEFAULT ''", ())?;
        tracing::info!("added the email column to the users table");
    }

    Ok(())
}

/// Seed the default global categories, keyed by name so that repeated
/// initialization never duplicates a row.
fn seed_default_categories(transaction: &SqlTransaction) -> Result<(), Error> {
    let mut statement = transaction.prepare(
        "INSERT INTO categories (name, user_id)
         SELECT ?1, NULL
         WHERE NOT EXISTS (SELECT 1 FROM categories WHERE name = ?1 AND user_id IS NULL)",
    )?;

    for name in DEFAULT_CATEGORIES {
        statement.execute((name,))?;
    }

    Ok(())
}
