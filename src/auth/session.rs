//! Who is logged in, as stored in the session cookie and as seen by handlers.

use std::cmp::max;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// The logged-in user for the current request.
///
/// Inserted into the request extensions by the auth middleware, so protected
/// handlers can take `Extension(session): Extension<SessionContext>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    /// The name of the logged-in user.
    pub username: String,
}

/// The value of the session cookie.
///
/// The expiry is kept as a Unix timestamp and always compared against the
/// server's UTC clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SessionToken {
    pub username: String,
    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

impl SessionToken {
    /// A session for `username` that ends `duration` from now.
    pub fn start(username: &str, duration: Duration) -> Self {
        Self {
            username: username.to_owned(),
            expires_at: OffsetDateTime::now_utc() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }

    /// Push the expiry out to `duration` from now. A later expiry, such as
    /// one from "keep me logged in", is left alone.
    pub fn refresh(self, duration: Duration) -> Self {
        Self {
            expires_at: max(self.expires_at, OffsetDateTime::now_utc() + duration),
            ..self
        }
    }

    pub fn context(&self) -> SessionContext {
        SessionContext {
            username: self.username.clone(),
        }
    }
}
