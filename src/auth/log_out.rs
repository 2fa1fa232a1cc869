use axum::response::Redirect;
use axum_extra::extract::PrivateCookieJar;

use crate::{
    auth::{clear_session_cookie, read_session},
    endpoints,
};

/// End the session and send the client back to the log-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> (PrivateCookieJar, Redirect) {
    if let Ok(session) = read_session(&jar) {
        tracing::info!("{} logged out", session.username);
    }

    (
        clear_session_cookie(jar),
        Redirect::to(endpoints::LOG_IN_VIEW),
    )
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use time::{Duration, OffsetDateTime};

    use crate::{app_state::create_cookie_key, auth::SESSION_COOKIE, endpoints};

    use super::get_log_out;

    #[tokio::test]
    async fn log_out_clears_session_cookie() {
        let app = Router::new()
            .route(endpoints::LOG_OUT, get(get_log_out))
            .with_state(create_cookie_key("42"));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get(endpoints::LOG_OUT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", endpoints::LOG_IN_VIEW);
        let cookie = response.cookie(SESSION_COOKIE);
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
    }
}
