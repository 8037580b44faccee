//! Budget Manager is a desktop app for tracking personal income and expenses.
//!
//! This library implements the application core: the SQLite persistence and
//! schema-migration layer, password hashing, and the registration, login and
//! transaction workflows. Window rendering, navigation and charts are left to
//! the embedding UI layer, which talks to the core through an [AppState] and
//! only ever receives plain data values or failure indicators, never errors.

#![warn(missing_docs)]

mod app_state;
mod database_id;

pub mod db;
pub mod export;
pub mod models;
pub mod services;
pub mod stores;

pub use app_state::AppState;
pub use database_id::DatabaseID;

/// The errors that may occur in the application core.
///
/// These never reach the UI layer: the [services](crate::services) convert
/// every error into the operation's failure indicator and log the cause.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The username used to register is already taken. The caller should try
    /// again with a different username.
    #[error("the username is already taken")]
    DuplicateUsername,

    /// A statement referenced a user that is not in the database.
    #[error("the user ID does not refer to a registered user")]
    InvalidForeignKey,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging. The overall
    /// register or login attempt fails.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A date-time could not be converted to or from its column text.
    ///
    /// Callers should pass in the original error as a string and the
    /// date-time that caused the error.
    #[error("could not convert the date-time \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// The requested row could not be found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist.
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist.
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// The export file could not be written.
    #[error("could not write the CSV file: {0}")]
    CsvError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("users.username") =>
            {
                Error::DuplicateUsername
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidForeignKey
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}
