//! # User Store & Authentication
//!
//! Credential verification for the register shell. The core never sees
//! credentials: a successful login produces a [`Principal`], and that is
//! all the core consumes.
//!
//! Accounts are seeded demo data with plaintext passwords; there is no
//! account management surface.

use std::collections::HashMap;

use paypoint_core::{Principal, Role};

/// Maximum consecutive failed logins before the shell exits.
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// A register account.
#[derive(Debug, Clone)]
pub struct User {
    username: String,
    password: String,
    role: Role,
}

impl User {
    /// Creates an account.
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        User {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    /// The account's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The account's role.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// In-memory account store.
#[derive(Debug, Default)]
pub struct UserStore {
    users: HashMap<String, User>,
}

impl UserStore {
    /// Builds a store from seeded accounts.
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        UserStore {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    /// Verifies credentials. On success returns the authenticated principal
    /// the core will consume; on failure returns nothing (the caller decides
    /// about retries).
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Principal> {
        self.users
            .get(username)
            .filter(|user| user.password == password)
            .map(|user| Principal::new(user.username.clone(), user.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> UserStore {
        UserStore::new([
            User::new("admin", "admin123", Role::Admin),
            User::new("dburton", "chiching", Role::Cashier),
        ])
    }

    #[test]
    fn test_authenticate_success() {
        let principal = store().authenticate("admin", "admin123").unwrap();
        assert_eq!(principal.username(), "admin");
        assert_eq!(principal.role(), Role::Admin);
    }

    #[test]
    fn test_authenticate_wrong_password() {
        assert!(store().authenticate("admin", "nope").is_none());
    }

    #[test]
    fn test_authenticate_unknown_user() {
        assert!(store().authenticate("ghost", "admin123").is_none());
    }

    #[test]
    fn test_cashier_role_carries_through() {
        let principal = store().authenticate("dburton", "chiching").unwrap();
        assert_eq!(principal.role(), Role::Cashier);
    }
}
