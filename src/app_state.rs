//! The state shared by every route: the cookie key, the timezone and the two CSV stores.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    Error, auth::DEFAULT_SESSION_DURATION, ledger::LedgerStore, timezone::get_local_offset,
    user::UserStore,
};

/// Everything the handlers need, cloned into each request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Encrypts and authenticates the session cookie.
    pub cookie_key: Key,

    /// How long a session lasts after each request.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,

    /// The users file.
    pub users: Arc<Mutex<UserStore>>,

    /// The ledger file, shared by every user.
    pub ledger: Arc<Mutex<LedgerStore>>,
}

impl AppState {
    /// Create a new [AppState] over the users and ledger files.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Tokyo".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        cookie_secret: &str,
        local_timezone: &str,
        users: UserStore,
        ledger: LedgerStore,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_SESSION_DURATION,
            local_timezone: local_timezone.to_owned(),
            users: Arc::new(Mutex::new(users)),
            ledger: Arc::new(Mutex::new(ledger)),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Derive the private cookie key from `secret` with SHA-512.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
