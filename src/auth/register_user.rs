//! The registration page for creating a new account.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        AuthField, auth_card, base, link, submit_button,
    },
    internal_server_error::get_internal_server_error_redirect,
    user::UserStore,
};

pub const EMPTY_FIELDS_ERROR_MSG: &str = "Please fill in all fields.";
pub const PASSWORD_MISMATCH_ERROR_MSG: &str = "Passwords do not match.";

#[derive(Default)]
struct RegistrationErrors<'a> {
    username: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

fn registration_form(username: &str, errors: RegistrationErrors<'_>) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#username, #password, #confirm-password, #submit-button"
            hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6"
        {
            (AuthField {
                label: "Username",
                name: "username",
                id: "username",
                input_type: "text",
                value: username,
                autocomplete: "username",
                error_message: errors.username,
            }
            .into_html())
            (AuthField {
                label: "Password",
                name: "password",
                id: "password",
                input_type: "password",
                value: "",
                autocomplete: "new-password",
                error_message: errors.password,
            }
            .into_html())
            (AuthField {
                label: "Confirm password",
                name: "confirm_password",
                id: "confirm-password",
                input_type: "password",
                value: "",
                autocomplete: "new-password",
                error_message: errors.confirm_password,
            }
            .into_html())

            (submit_button("Create account"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                (link(endpoints::LOG_IN_VIEW, "Log in here"))
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form("", RegistrationErrors::default());
    let content = auth_card("Create an account", &registration_form);
    base("Register", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    pub users: Arc<Mutex<UserStore>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Create a new account and send the client to the log-in page.
///
/// The client is not logged in automatically. Validation problems are shown
/// in the returned form and the users file is left untouched.
pub async fn register_user(
    State(state): State<RegistrationState>,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let username = user_data.username.trim();

    if username.is_empty() || user_data.password.is_empty() {
        return registration_form(
            username,
            RegistrationErrors {
                password: Some(EMPTY_FIELDS_ERROR_MSG),
                ..Default::default()
            },
        )
        .into_response();
    }

    if user_data.password != user_data.confirm_password {
        return registration_form(
            username,
            RegistrationErrors {
                confirm_password: Some(PASSWORD_MISMATCH_ERROR_MSG),
                ..Default::default()
            },
        )
        .into_response();
    }

    let store = match state.users.lock() {
        Ok(store) => store,
        Err(_) => {
            tracing::error!("Could not acquire the users store lock");
            return get_internal_server_error_redirect();
        }
    };

    let result = store
        .load()
        .and_then(|users| store.register(username, &user_data.password, users));

    match result {
        Ok(_) => (
            HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::DuplicateUsername(_)) => registration_form(
            username,
            RegistrationErrors {
                username: Some(&error.to_string()),
                ..Default::default()
            },
        )
        .into_response(),
        Err(Error::EmptyCredentials) => registration_form(
            username,
            RegistrationErrors {
                password: Some(EMPTY_FIELDS_ERROR_MSG),
                ..Default::default()
            },
        )
        .into_response(),
        Err(error) => {
            tracing::error!("Could not register {username}: {error}");
            get_internal_server_error_redirect()
        }
    }
}
