//! Reading and writing the encrypted session cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use cookie::CookieBuilder;
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::session::SessionToken};

pub(crate) const SESSION_COOKIE: &str = "kakeibo_session";
/// How long a session lasts after the last request, unless the user asked to be remembered.
pub(crate) const DEFAULT_SESSION_DURATION: Duration = Duration::minutes(5);

fn session_cookie(value: String) -> CookieBuilder<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
}

/// Store `token` in `jar`. The cookie expires along with the session.
///
/// # Errors
///
/// Returns [Error::JSONSerializationError] if the token cannot be serialized.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    token: &SessionToken,
) -> Result<PrivateCookieJar, Error> {
    let value =
        serde_json::to_string(token).map_err(|e| Error::JSONSerializationError(e.to_string()))?;

    Ok(jar.add(session_cookie(value).expires(token.expires_at)))
}

/// Overwrite the session cookie with one the browser will drop immediately.
pub(crate) fn clear_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        session_cookie(String::new())
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO),
    )
}

/// The unexpired session stored in `jar`.
///
/// # Errors
///
/// - [Error::CookieMissing] if there is no session cookie, or it was not
///   encrypted with this server's key.
/// - [Error::InvalidCredentials] if the cookie does not hold a session token.
/// - [Error::SessionExpired] if the session has ended.
pub(crate) fn read_session(jar: &PrivateCookieJar) -> Result<SessionToken, Error> {
    let cookie = jar.get(SESSION_COOKIE).ok_or(Error::CookieMissing)?;
    let token: SessionToken =
        serde_json::from_str(cookie.value_trimmed()).map_err(|_| Error::InvalidCredentials)?;

    if token.is_expired() {
        return Err(Error::SessionExpired);
    }

    Ok(token)
}
