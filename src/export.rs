//! Writes transactions to the tabular export format.
//!
//! The export file has the columns Date, Description, Category and Amount,
//! one row per transaction, with dates formatted as `YYYY-MM-DD`.

use std::{fs::File, io::Write, path::Path};

use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, models::Transaction};

/// The format for the Date column of the export file. Time of day is not
/// exported.
const EXPORT_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Write `transactions` as CSV to `writer`, header row included.
///
/// # Errors
///
/// Returns [Error::CsvError] if a record could not be written, or
/// [Error::InvalidDateFormat] if a date could not be formatted.
pub fn write_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer
        .write_record(["Date", "Description", "Category", "Amount"])
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for transaction in transactions {
        let date = transaction.date.format(EXPORT_DATE_FORMAT).map_err(|error| {
            Error::InvalidDateFormat(error.to_string(), transaction.date.to_string())
        })?;

        writer
            .write_record([
                date,
                transaction.description.clone(),
                transaction.category.clone(),
                transaction.amount.to_string(),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    writer
        .flush()
        .map_err(|error| Error::CsvError(error.to_string()))
}

/// Write `transactions` as CSV to the file at `path`, replacing any existing
/// file.
///
/// # Errors
///
/// Returns [Error::CsvError] if the file could not be created or a record
/// could not be written.
pub fn export_transactions(transactions: &[Transaction], path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(|error| Error::CsvError(error.to_string()))?;

    write_transactions_csv(transactions, file)
}

#[cfg(test)]
mod export_tests {
    use time::macros::datetime;

    use crate::models::{Transaction, UserID};

    use super::write_transactions_csv;

    fn test_transaction(id: i64, description: &str, amount: f64) -> Transaction {
        Transaction {
            id,
            user_id: UserID::new(1),
            description: description.to_string(),
            amount,
            category: "Food".to_string(),
            date: datetime!(2025-03-14 08:30:00),
        }
    }

    #[test]
    fn export_writes_header_and_short_dates() {
        let transactions = vec![
            test_transaction(1, "Coffee", -4.5),
            test_transaction(2, "Refund", 12.0),
        ];
        let mut buffer = Vec::new();

        write_transactions_csv(&transactions, &mut buffer).unwrap();

        let got = String::from_utf8(buffer).unwrap();
        assert_eq!(
            got,
            "Date,Description,Category,Amount\n\
             2025-03-14,Coffee,Food,-4.5\n\
             2025-03-14,Refund,Food,12\n"
        );
    }

    #[test]
    fn export_quotes_descriptions_containing_commas() {
        let transactions = vec![test_transaction(1, "Lunch, with tip", -23.4)];
        let mut buffer = Vec::new();

        write_transactions_csv(&transactions, &mut buffer).unwrap();

        let got = String::from_utf8(buffer).unwrap();
        assert_eq!(
            got,
            "Date,Description,Category,Amount\n\
             2025-03-14,\"Lunch, with tip\",Food,-23.4\n"
        );
    }

    #[test]
    fn export_of_no_transactions_writes_only_the_header() {
        let mut buffer = Vec::new();

        write_transactions_csv(&[], &mut buffer).unwrap();

        let got = String::from_utf8(buffer).unwrap();
        assert_eq!(got, "Date,Description,Category,Amount\n");
    }
}
