//! HTML assertions shared by the handler tests.

use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).into_owned()
}

/// Parse a full page response.
pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

/// Parse a response that is swapped into part of a page, such as a form or an alert.
pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Check that `form` posts to `endpoint` with htmx, has a submit button, and
/// has a required input for each `(name, type)` in `inputs`.
#[track_caller]
pub(crate) fn assert_htmx_form(form: &ElementRef<'_>, endpoint: &str, inputs: &[(&str, &str)]) {
    assert_eq!(form.value().attr("hx-post"), Some(endpoint));

    for (name, want_type) in inputs {
        let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
        let input = form
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("No input named {name:?}"));

        assert_eq!(
            input.value().attr("type"),
            Some(*want_type),
            "input {name:?} has the wrong type"
        );
        assert!(
            input.value().attr("required").is_some(),
            "input {name:?} should be required"
        );
    }

    let submit_buttons = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .count();
    assert_eq!(submit_buttons, 1, "want exactly one submit button");
}

/// The text of the first error paragraph in `form`, trimmed.
#[track_caller]
pub(crate) fn form_error_text(form: &ElementRef<'_>) -> String {
    form.select(&Selector::parse("p").unwrap())
        .next()
        .expect("No error message found")
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}
