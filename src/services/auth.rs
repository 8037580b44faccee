//! The registration and login workflows.

use crate::{
    Error,
    models::{PasswordHash, User},
    stores::UserStore,
};

/// Provides the registration and login workflows over a [UserStore].
///
/// Neither operation returns an error or the stored password digest: the
/// caller gets a [User] profile or [None]. There is no session object; the
/// caller holds the returned profile and passes its ID into subsequent
/// calls.
#[derive(Debug, Clone)]
pub struct AuthService<U> {
    user_store: U,
    hash_cost: u32,
}

impl<U: UserStore> AuthService<U> {
    /// Create a new auth service on top of `user_store`, hashing passwords
    /// with [PasswordHash::DEFAULT_COST].
    pub fn new(user_store: U) -> Self {
        Self {
            user_store,
            hash_cost: PasswordHash::DEFAULT_COST,
        }
    }

    /// Create a new auth service that hashes passwords with a reduced
    /// `cost`.
    ///
    /// Lower costs hash faster but are easier to brute-force; use
    /// [AuthService::new] outside of tests and benchmarks.
    pub fn with_hash_cost(user_store: U, cost: u32) -> Self {
        Self {
            user_store,
            hash_cost: cost,
        }
    }

    /// Register a new user and return their profile.
    ///
    /// Returns [None] if the username is blank or already taken, if the
    /// password could not be hashed, or if the user row could not be
    /// created. The cause is logged, not returned.
    pub fn register(&mut self, username: &str, email: &str, password: &str) -> Option<User> {
        if username.trim().is_empty() {
            tracing::info!("registration rejected: blank username");
            return None;
        }

        // Look the username up first so that a taken name is cleanly
        // distinguishable from a store error.
        match self.user_store.get_by_username(username) {
            Ok(_) => {
                tracing::info!("registration failed: username {username} already exists");
                return None;
            }
            Err(Error::NotFound) => {}
            Err(error) => {
                tracing::error!("registration failed: could not look up {username}: {error}");
                return None;
            }
        }

        let password_hash = match PasswordHash::new(password, self.hash_cost) {
            Ok(password_hash) => password_hash,
            Err(error) => {
                tracing::error!("registration failed: {error}");
                return None;
            }
        };

        match self.user_store.create(username, email, password_hash) {
            Ok(record) => {
                tracing::info!("user registered: {username}");
                Some(record.into())
            }
            Err(error) => {
                tracing::error!("failed to create user {username}: {error}");
                None
            }
        }
    }

    /// Authenticate a user by username and password and return their
    /// profile.
    ///
    /// An unknown username and a wrong password both return [None]: the
    /// caller cannot tell the two apart, only the log can.
    pub fn login(&self, username: &str, password: &str) -> Option<User> {
        let record = match self.user_store.get_by_username(username) {
            Ok(record) => record,
            Err(Error::NotFound) => {
                tracing::info!("login failed: username {username} not found");
                return None;
            }
            Err(error) => {
                tracing::error!("login failed: could not look up {username}: {error}");
                return None;
            }
        };

        if record.password_hash.verify(password) {
            tracing::info!("user logged in: {username}");
            Some(record.into())
        } else {
            tracing::info!("login failed: invalid password for {username}");
            None
        }
    }
}

#[cfg(test)]
mod auth_service_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{db::initialize, stores::sqlite::SQLiteUserStore};

    use super::AuthService;

    fn get_service() -> AuthService<SQLiteUserStore> {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        AuthService::with_hash_cost(SQLiteUserStore::new(Arc::new(Mutex::new(connection))), 4)
    }

    #[test]
    fn register_returns_profile_without_password() {
        let mut service = get_service();

        let user = service.register("alice", "a@x.com", "secret1").unwrap();

        assert!(user.id.as_i64() > 0);
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn register_fails_on_duplicate_username() {
        let mut service = get_service();

        assert!(service.register("alice", "a@x.com", "secret1").is_some());
        assert!(service.register("alice", "b@y.com", "other12").is_none());
    }

    #[test]
    fn register_fails_on_blank_username() {
        let mut service = get_service();

        assert!(service.register("", "a@x.com", "secret1").is_none());
        assert!(service.register("   ", "a@x.com", "secret1").is_none());
    }

    #[test]
    fn login_returns_registered_user() {
        let mut service = get_service();
        let registered = service.register("alice", "a@x.com", "secret1").unwrap();

        let logged_in = service.login("alice", "secret1").unwrap();

        assert_eq!(logged_in, registered);
    }

    #[test]
    fn login_failures_share_one_shape() {
        let mut service = get_service();
        service.register("alice", "a@x.com", "secret1").unwrap();

        let unknown_username = service.login("nonexistent", "secret1");
        let wrong_password = service.login("alice", "wrong");

        assert_eq!(unknown_username, None);
        assert_eq!(wrong_password, None);
    }
}
