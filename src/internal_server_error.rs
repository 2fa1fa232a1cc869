//! The 500 page, and the htmx redirect that sends a client to it.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{endpoints, html::error_view};

const GENERIC_DESCRIPTION: &str = "Sorry, something went wrong.";
const GENERIC_FIX: &str = "Try again later or check the server logs";

/// A 500 page with a description of the failure and a suggested fix.
///
/// The default is a generic message that leaks nothing about the cause.
pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: GENERIC_DESCRIPTION,
            fix: GENERIC_FIX,
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", self.description, self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

/// Send an htmx client to the 500 page.
///
/// Full page loads should use [axum::response::Redirect] instead, since only
/// htmx acts on the `HX-Redirect` header.
pub(crate) fn get_internal_server_error_redirect() -> Response {
    (
        HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
        .into_response()
}
