//! The workflows the UI layer calls: registration, login and transaction
//! management.
//!
//! Services log failures and return plain failure indicators (`None`,
//! `false`, an empty vector) instead of raising errors across the boundary.
//! The UI should treat every failure indicator as "show a generic,
//! retry-safe message": causes are only differentiated in the log.

mod auth;
mod transaction;

pub use auth::AuthService;
pub use transaction::{TransactionService, TransactionUpdate};
