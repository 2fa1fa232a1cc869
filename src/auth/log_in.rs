//! The log-in page and the handler that checks credentials and starts a session.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error,
    auth::{SessionToken, clear_session_cookie, normalize_redirect_url, set_session_cookie},
    endpoints,
    html::{AuthField, auth_card, base, link, submit_button},
    internal_server_error::get_internal_server_error_redirect,
    user::{UserStore, authenticate},
};

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect username or password.";
pub const EMPTY_CREDENTIALS_ERROR_MSG: &str = "Please enter your username and password.";

/// How long a session started with "keep me logged in" lasts.
const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

/// What the log-in form shows: the username typed so far, an error from the
/// last attempt and the page to return to afterwards.
#[derive(Default)]
struct LogInForm<'a> {
    username: &'a str,
    error_message: Option<&'a str>,
    redirect_url: Option<&'a str>,
}

impl LogInForm<'_> {
    fn into_html(self) -> Markup {
        html! {
            form
                hx-post=(endpoints::LOG_IN_API)
                hx-indicator="#indicator"
                hx-disabled-elt="#username, #password, #submit-button"
                hx-target-error="#alert-container"
                class="space-y-4 md:space-y-6"
            {
                @if let Some(redirect_url) = self.redirect_url {
                    input type="hidden" name="redirect_url" value=(redirect_url);
                }

                (AuthField {
                    label: "Username",
                    name: "username",
                    id: "username",
                    input_type: "text",
                    value: self.username,
                    autocomplete: "username",
                    error_message: None,
                }
                .into_html())
                (AuthField {
                    label: "Password",
                    name: "password",
                    id: "password",
                    input_type: "password",
                    value: "",
                    autocomplete: "current-password",
                    error_message: self.error_message,
                }
                .into_html())

                label class="flex items-center gap-x-3 text-sm font-medium text-gray-900 dark:text-white"
                {
                    input type="checkbox" name="remember_me" id="remember_me" tabindex="0" class="rounded-xs";
                    "Keep me logged in for one week"
                }

                (submit_button("Log in"))

                p class="text-sm font-light text-gray-500 dark:text-gray-400"
                {
                    "Don't have an account? "
                    (link(endpoints::REGISTER_VIEW, "Register here"))
                }
            }
        }
    }
}

/// `raw_url` if it is a local path, logging and dropping anything else.
fn local_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    let raw_url = raw_url?;
    let redirect_url = normalize_redirect_url(raw_url);

    if redirect_url.is_none() {
        tracing::warn!("Ignoring redirect URL from {source}: {raw_url}");
    }

    redirect_url
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// Display the log-in page.
///
/// A local `redirect_url` in the query is carried through the form so the
/// user lands back where they started.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = local_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let form = LogInForm {
        redirect_url: redirect_url.as_deref(),
        ..Default::default()
    };

    let content = auth_card("Log in to your household ledger", &form.into_html());
    base("Log In", &[], &content).into_response()
}

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    pub cookie_key: Key,
    /// How long a session lasts without "keep me logged in".
    pub cookie_duration: Duration,
    pub users: Arc<Mutex<UserStore>>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            users: state.users.clone(),
        }
    }
}

impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the log-in form.
///
/// The password is only compared against the stored hash and never saved.
#[derive(Deserialize)]
pub struct LogInData {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Set to any value when the "keep me logged in" box is ticked, absent otherwise.
    pub remember_me: Option<String>,

    /// The page to return to after logging in. Non-local URLs are ignored.
    pub redirect_url: Option<String>,
}

/// Check the submitted credentials and start a session.
///
/// The username is trimmed the same way registration trims it. On success the
/// session cookie is set and htmx is sent to `redirect_url` or the ledger. A
/// missing field or a bad username/password pair re-renders the form with an
/// error, and empty fields are rejected before the users file is read.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = local_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let username = user_data.username.trim();

    let rejected = |error_message: &'static str| {
        LogInForm {
            username,
            error_message: Some(error_message),
            redirect_url: redirect_url.as_deref(),
        }
        .into_html()
        .into_response()
    };

    if username.is_empty() || user_data.password.is_empty() {
        return rejected(EMPTY_CREDENTIALS_ERROR_MSG);
    }

    let users = state
        .users
        .lock()
        .map_err(|_| Error::StoreLockError)
        .and_then(|store| store.load());
    let users = match users {
        Ok(users) => users,
        Err(error) => {
            tracing::error!("Could not load users while verifying credentials: {error}");
            return get_internal_server_error_redirect();
        }
    };

    if !authenticate(username, &user_data.password, &users) {
        tracing::info!("Failed log-in attempt for {username}");
        return rejected(INVALID_CREDENTIALS_ERROR_MSG);
    }

    let session_length = match user_data.remember_me {
        Some(_) => REMEMBER_ME_COOKIE_DURATION,
        None => state.cookie_duration,
    };
    let session = SessionToken::start(username, session_length);

    match set_session_cookie(jar.clone(), &session) {
        Ok(jar) => {
            tracing::info!("{username} logged in");
            let destination = redirect_url.as_deref().unwrap_or(endpoints::LEDGER_VIEW);

            (HxRedirect(destination.to_owned()), jar, StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Could not set the session cookie: {error}");

            (
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                clear_session_cookie(jar),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
                .into_response()
        }
    }
}
