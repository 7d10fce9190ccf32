//! Account domain type.

use serde::{Deserialize, Serialize};

use crate::{Email, Role};

/// A login account.
///
/// The email is the natural key; no two accounts in a store share one. The
/// password is kept in plaintext: this is a demo portal, not a security
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
    pub role: Role,
    pub verified: bool,
}

impl Account {
    /// "First Last", trimmed when either part is empty.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Returns true if the account has the administrator role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Exact, case-sensitive credential comparison.
    #[must_use]
    pub fn matches_credentials(&self, email: &Email, password: &str) -> bool {
        self.email == *email && self.password == password
    }
}
