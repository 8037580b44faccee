//! This file defines the type that handles password hashing and verification.
//! A `PasswordHash` holds the salted bcrypt digest of a password, never the
//! plaintext.

use std::fmt::Display;

use bcrypt::{hash, verify};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash `raw_password` with a freshly generated random salt.
    ///
    /// Because the salt is fresh on every call, hashing the same password
    /// twice produces two different digests.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed
    /// to verify a password. A value of at least 12 is recommended. Pass in
    /// [PasswordHash::DEFAULT_COST] to use the recommended cost.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::HashingError] if the underlying
    /// library could not hash the password.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, Error> {
        match hash(raw_password, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(error) => Err(Error::HashingError(error.to_string())),
        }
    }

    /// Create a new `PasswordHash` from a digest retrieved from the database,
    /// without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid bcrypt
    /// digest.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`,
    /// because if an invalid digest is provided it may cause incorrect
    /// behaviour but will not affect memory safety.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored digest.
    ///
    /// Returns `false` when the password does not match, and also when the
    /// digest is malformed. In the latter case the underlying error is
    /// logged, not propagated.
    pub fn verify(&self, raw_password: &str) -> bool {
        match verify(raw_password, &self.0) {
            Ok(matches) => matches,
            Err(error) => {
                tracing::error!("password verification failed: {error}");
                false
            }
        }
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod password_hash_tests {
    use crate::models::PasswordHash;

    #[test]
    fn hash_password_produces_verifiable_digest() {
        let password = "roostersgocockledoodledoo";
        let wrong_password = "the_wrong_password";

        let hash = PasswordHash::new(password, 4).unwrap();

        assert!(hash.verify(password));
        assert!(!hash.verify(wrong_password));
    }

    #[test]
    fn hash_duplicate_password_produces_unique_digest() {
        let password = "turkeysgogobblegobble";

        let hash = PasswordHash::new(password, 4).unwrap();
        let dupe_hash = PasswordHash::new(password, 4).unwrap();

        assert_ne!(hash, dupe_hash);
        assert!(hash.verify(password));
        assert!(dupe_hash.verify(password));
    }

    #[test]
    fn verify_returns_false_for_malformed_digest() {
        let hash = PasswordHash::new_unchecked("not a bcrypt digest");

        assert!(!hash.verify("hunter2"));
    }

    #[test]
    fn verify_returns_false_for_empty_digest() {
        let hash = PasswordHash::new_unchecked("");

        assert!(!hash.verify("hunter2"));
    }
}
