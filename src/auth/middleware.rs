//! Middleware that only lets requests with a live session through to protected routes.

use axum::{
    extract::{FromRef, Request, State},
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::Duration;

use crate::{
    AppState,
    auth::{
        cookie::{read_session, set_session_cookie},
        redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target},
    },
    endpoints,
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How long a session lasts after the last request.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

/// How a rejected request is sent to the log-in page.
#[derive(Debug, Clone, Copy)]
enum LogInRedirect {
    /// A `303 See Other` for full page loads.
    Location,
    /// An `HX-Redirect` header, so htmx navigates instead of swapping the log-in page in.
    Htmx,
}

impl LogInRedirect {
    fn to(self, url: &str) -> Response {
        match self {
            LogInRedirect::Location => Redirect::to(url).into_response(),
            LogInRedirect::Htmx => (HxRedirect(url.to_owned()), StatusCode::OK).into_response(),
        }
    }
}

fn log_in_url_for(request: &Request) -> String {
    build_log_in_redirect_url(request)
        .or_else(|| build_log_in_redirect_url_from_target(endpoints::LEDGER_VIEW))
        .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
}

async fn guard(
    state: AuthState,
    redirect: LogInRedirect,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = PrivateCookieJar::from_headers(request.headers(), state.cookie_key.clone());

    let session = match read_session(&jar) {
        Ok(session) => session,
        Err(error) => {
            tracing::debug!("Rejected request to {}: {error}", request.uri().path());
            return redirect.to(&log_in_url_for(&request));
        }
    };

    request.extensions_mut().insert(session.context());
    let mut response = next.run(request).await;

    match set_session_cookie(jar, &session.refresh(state.cookie_duration)) {
        Ok(jar) => {
            let cookies = jar.into_response();
            for cookie in cookies.headers().get_all(SET_COOKIE) {
                response.headers_mut().append(SET_COOKIE, cookie.clone());
            }
        }
        Err(error) => tracing::error!("Could not refresh the session cookie: {error}"),
    }

    response
}

/// Middleware function that checks for a valid session cookie.
///
/// The [SessionContext](crate::SessionContext) is placed into the request and
/// the request executed normally if the session is live, and the session is
/// extended on the way out. Otherwise a redirect to the log-in page is returned.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    guard(state, LogInRedirect::Location, request, next).await
}

/// Like [auth_guard], but for the htmx API routes.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state, LogInRedirect::Htmx, request, next).await
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Router, http::header::SET_COOKIE, middleware, response::IntoResponse,
        routing::get,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
    use axum_htmx::HX_REDIRECT;
    use axum_test::TestServer;
    use time::{Duration, OffsetDateTime};

    use crate::{
        app_state::create_cookie_key,
        auth::{
            DEFAULT_SESSION_DURATION, SESSION_COOKIE, SessionContext, SessionToken,
            set_session_cookie,
        },
        endpoints,
    };

    use super::{AuthState, auth_guard, auth_guard_hx};

    const PAGE: &str = "/ledger";
    const API: &str = "/api/transactions";

    async fn whoami(Extension(session): Extension<SessionContext>) -> String {
        session.username
    }

    fn get_state() -> AuthState {
        AuthState {
            cookie_key: create_cookie_key("nafstenoas"),
            cookie_duration: DEFAULT_SESSION_DURATION,
        }
    }

    fn get_test_server() -> TestServer {
        let state = get_state();
        let app = Router::new()
            .route(PAGE, get(whoami))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .merge(
                Router::new()
                    .route(API, get(whoami))
                    .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
            )
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    /// The encrypted cookie a browser would send back for a session of `duration`.
    fn browser_cookie(duration: Duration) -> Cookie<'static> {
        let jar = PrivateCookieJar::new(get_state().cookie_key);
        let jar = set_session_cookie(jar, &SessionToken::start("alice", duration)).unwrap();
        let response = jar.into_response();
        let header = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();

        Cookie::parse(header.to_owned()).unwrap()
    }

    fn log_in_location(redirect_url: &str) -> String {
        let query = serde_urlencoded::to_string([("redirect_url", redirect_url)]).unwrap();

        format!("{}?{query}", endpoints::LOG_IN_VIEW)
    }

    #[tokio::test]
    async fn live_session_reaches_handler_and_is_extended() {
        let server = get_test_server();

        let response = server
            .get(PAGE)
            .add_cookie(browser_cookie(Duration::seconds(30)))
            .await;

        response.assert_status_ok();
        response.assert_text("alice");
        let expires = response.cookie(SESSION_COOKIE).expires_datetime().unwrap();
        let want = OffsetDateTime::now_utc() + DEFAULT_SESSION_DURATION;
        assert!(
            (expires - want).abs() < Duration::seconds(2),
            "got expiry {expires:?}, want about {want:?}"
        );
    }

    #[tokio::test]
    async fn missing_session_redirects_to_log_in() {
        let server = get_test_server();

        let response = server.get(PAGE).await;

        response.assert_status_see_other();
        response.assert_header("location", log_in_location(PAGE));
    }

    #[tokio::test]
    async fn expired_session_redirects_to_log_in() {
        let server = get_test_server();

        let response = server
            .get(PAGE)
            .add_cookie(browser_cookie(Duration::seconds(-10)))
            .await;

        response.assert_status_see_other();
        response.assert_header("location", log_in_location(PAGE));
    }

    #[tokio::test]
    async fn forged_cookie_redirects_to_log_in() {
        let server = get_test_server();
        let forged = format!(
            r#"{{"username":"alice","expires_at":{}}}"#,
            (OffsetDateTime::now_utc() + Duration::days(1)).unix_timestamp()
        );

        let response = server
            .get(PAGE)
            .add_cookie(Cookie::new(SESSION_COOKIE, forged))
            .await;

        response.assert_status_see_other();
    }

    #[tokio::test]
    async fn api_route_redirects_with_hx_redirect() {
        let server = get_test_server();

        let response = server
            .get(API)
            .add_header("HX-Request", "true")
            .add_header("HX-Current-URL", "http://localhost:3000/ledger")
            .await;

        response.assert_status_ok();
        response.assert_header(HX_REDIRECT, log_in_location("/ledger"));
    }
}
