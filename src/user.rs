//! The registered users and the CSV file they are stored in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::PasswordHash,
    table::{read_table, write_table},
};

/// The column names of the users CSV file, in the order they are written.
pub const USER_COLUMNS: [&str; 2] = ["username", "password"];

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The name the user logs in with. Case-sensitive.
    pub username: String,
    /// The bcrypt hash of the user's password.
    pub password: PasswordHash,
}

/// Whether a user named exactly `username` is in `users`.
pub fn user_exists(username: &str, users: &[UserRecord]) -> bool {
    users.iter().any(|user| user.username == username)
}

/// Whether `users` has a user named exactly `username` whose password is `password`.
///
/// A stored password that is not a valid bcrypt hash never matches.
pub fn authenticate(username: &str, password: &str, users: &[UserRecord]) -> bool {
    users
        .iter()
        .filter(|user| user.username == username)
        .any(|user| match user.password.matches(password) {
            Ok(is_match) => is_match,
            Err(error) => {
                tracing::warn!("Stored password for {username} could not be verified: {error}");
                false
            }
        })
}

/// The users file on disk.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
    password_cost: u32,
}

impl UserStore {
    /// Create a store for the users file at `path`, hashing new passwords with
    /// `password_cost` rounds (see [PasswordHash::DEFAULT_COST]).
    pub fn new(path: impl Into<PathBuf>, password_cost: u32) -> Self {
        Self {
            path: path.into(),
            password_cost,
        }
    }

    /// The location of the users file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every registered user.
    ///
    /// A missing or empty file means no users are registered.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Io] or [Error::InvalidCSV] if the file exists but
    /// could not be read.
    pub fn load(&self) -> Result<Vec<UserRecord>, Error> {
        read_table(&self.path)
    }

    /// Overwrite the users file with `users`.
    pub fn save(&self, users: &[UserRecord]) -> Result<(), Error> {
        write_table(&self.path, &USER_COLUMNS, users)
    }

    /// Add a new user to `users` and save the result.
    ///
    /// # Errors
    ///
    /// Nothing is saved if an error is returned.
    ///
    /// - [Error::EmptyCredentials] if `username` or `password` is empty.
    /// - [Error::DuplicateUsername] if `username` is already registered.
    /// - [Error::HashingError] if the password could not be hashed.
    /// - [Error::Io] if the file could not be written.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        mut users: Vec<UserRecord>,
    ) -> Result<Vec<UserRecord>, Error> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::EmptyCredentials);
        }

        if user_exists(username, &users) {
            return Err(Error::DuplicateUsername(username.to_owned()));
        }

        let password = PasswordHash::hash(password, self.password_cost)?;

        users.push(UserRecord {
            username: username.to_owned(),
            password,
        });
        self.save(&users)?;

        tracing::info!("Registered new user {username}");

        Ok(users)
    }
}
