//! The bcrypt hash kept in the `password` column of the users file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A salted bcrypt hash of a user's password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The cost used outside of tests. Each step doubles the work needed to hash or verify.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Salt and hash `raw_password` with `cost` rounds.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCredentials] for an empty password and
    /// [Error::HashingError] if bcrypt fails, e.g. for a cost outside 4..=31.
    pub fn hash(raw_password: &str, cost: u32) -> Result<Self, Error> {
        if raw_password.is_empty() {
            return Err(Error::EmptyCredentials);
        }

        bcrypt::hash(raw_password, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Whether `raw_password` hashes to this value.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the stored value is not a bcrypt hash.
    pub fn matches(&self, raw_password: &str) -> Result<bool, Error> {
        bcrypt::verify(raw_password, &self.0).map_err(|error| Error::HashingError(error.to_string()))
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
impl From<&str> for PasswordHash {
    fn from(stored: &str) -> Self {
        Self(stored.to_owned())
    }
}
