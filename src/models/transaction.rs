//! This file defines transactions, the builder for creating them, and the
//! text format their dates use at the database boundary.

use serde::{Deserialize, Serialize};
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{DatabaseID, models::UserID};

/// The format for transaction dates at the database boundary.
///
/// Dates are stored as naive date-times with second precision and no zone
/// offset. Reading a stored date back reproduces the same instant down to
/// the second.
pub const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// The current date-time without a zone offset, truncated to whole seconds.
///
/// Used as the default transaction date. Falls back to UTC when the local
/// offset cannot be determined, which can happen on multi-threaded Unix
/// processes where reading the environment is unsound.
pub fn now_local() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

    truncate_to_seconds(PrimitiveDateTime::new(now.date(), now.time()))
}

/// Discard the sub-second component of `date`. The database stores dates
/// with second precision, so anything finer would not survive a round-trip.
fn truncate_to_seconds(date: PrimitiveDateTime) -> PrimitiveDateTime {
    let time = date
        .time()
        .replace_nanosecond(0)
        .expect("zero nanoseconds is always in range");

    PrimitiveDateTime::new(date.date(), time)
}

/// A single financial movement: an expense or an income.
///
/// A positive amount records income and a negative amount records an
/// expense; the sign is the only income/expense discriminator.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// The ID of the user the transaction belongs to.
    pub user_id: UserID,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// The category label. The seeded defaults are a starting point, not a
    /// restriction: any free-text label is valid.
    pub category: String,
    /// When the transaction happened, distinct from when the row was
    /// created.
    pub date: PrimitiveDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(
        user_id: UserID,
        description: &str,
        amount: f64,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder::new(user_id, description, amount, category)
    }
}

/// A builder for creating [Transaction]s.
///
/// The date defaults to the current local date-time. Finalize the builder by
/// passing it to [TransactionStore::create](crate::stores::TransactionStore::create),
/// which assigns the ID.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The ID of the owning user.
    pub user_id: UserID,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The signed amount. Positive for income, negative for an expense.
    pub amount: f64,
    /// The category label.
    pub category: String,
    /// When the transaction happened.
    pub date: PrimitiveDateTime,
}

impl TransactionBuilder {
    /// Create a builder with the date defaulted to the current local
    /// date-time.
    pub fn new(user_id: UserID, description: &str, amount: f64, category: &str) -> Self {
        Self {
            user_id,
            description: description.to_owned(),
            amount,
            category: category.to_owned(),
            date: now_local(),
        }
    }

    /// Set the transaction date.
    ///
    /// Sub-second precision is discarded: dates are stored with second
    /// precision.
    pub fn date(mut self, date: PrimitiveDateTime) -> Self {
        self.date = truncate_to_seconds(date);
        self
    }
}

#[cfg(test)]
mod date_format_tests {
    use time::{PrimitiveDateTime, macros::datetime};

    use super::{DATE_TIME_FORMAT, now_local, truncate_to_seconds};

    #[test]
    fn format_matches_column_layout() {
        let date = datetime!(2024-08-07 09:05:03);

        let formatted = date.format(DATE_TIME_FORMAT).unwrap();

        assert_eq!(formatted, "2024-08-07 09:05:03");
    }

    #[test]
    fn parse_reverses_format_exactly() {
        let date = datetime!(2025-12-31 23:59:59);

        let formatted = date.format(DATE_TIME_FORMAT).unwrap();
        let parsed = PrimitiveDateTime::parse(&formatted, DATE_TIME_FORMAT).unwrap();

        assert_eq!(parsed, date);
    }

    #[test]
    fn truncation_drops_sub_second_precision() {
        let date = datetime!(2024-08-07 09:05:03.123456789);

        assert_eq!(truncate_to_seconds(date), datetime!(2024-08-07 09:05:03));
    }

    #[test]
    fn now_has_whole_seconds() {
        assert_eq!(now_local().nanosecond(), 0);
    }
}
