//! The domain models shared by the stores and services.

mod password;
mod transaction;
mod user;

pub use password::PasswordHash;
pub use transaction::{DATE_TIME_FORMAT, Transaction, TransactionBuilder, now_local};
pub use user::{User, UserID, UserRecord};
