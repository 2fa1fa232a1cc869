//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

/// Form fields whose values are replaced with asterisks before logging.
const REDACTED_FIELDS: [&str; 2] = ["password", "confirm_password"];

/// Bodies longer than this many bytes are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body_text) = extract_header_and_body_text_from_request(request).await;

    if headers.method == Method::POST && is_form(headers.headers.get(CONTENT_TYPE)) {
        log_request(&headers, &redact_form_fields(&body_text));
    } else {
        log_request(&headers, &body_text);
    }

    let request = Request::from_parts(headers, Body::from(body_text));
    let response = next.run(request).await;

    let (headers, body_text) = extract_header_and_body_text_from_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, Body::from(body_text))
}

fn is_form(content_type: Option<&axum::http::HeaderValue>) -> bool {
    content_type
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

fn redact_form_fields(form_text: &str) -> String {
    form_text
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if REDACTED_FIELDS.contains(&key) => format!("{key}=********"),
            _ => pair.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

async fn extract_header_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (headers, body) = request.into_parts();
    (headers, body_to_text(body).await)
}

async fn extract_header_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (headers, body) = response.into_parts();
    (headers, body_to_text(body).await)
}

async fn body_to_text(body: Body) -> String {
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
        Err(error) => {
            tracing::error!("Could not read body for logging: {error}");
            String::new()
        }
    }
}

/// The longest prefix of `text` that is at most [LOG_BODY_LENGTH_LIMIT]
/// bytes and ends on a character boundary.
fn truncate_body(text: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(text.len());

    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware, routing::post};
    use axum_test::TestServer;

    use super::{LOG_BODY_LENGTH_LIMIT, logging_middleware, redact_form_fields, truncate_body};

    #[test]
    fn redacts_password_fields() {
        let got = redact_form_fields("username=alice&password=hunter2&confirm_password=hunter2");

        assert_eq!(
            got,
            "username=alice&password=********&confirm_password=********"
        );
    }

    #[test]
    fn leaves_other_fields_untouched() {
        let got = redact_form_fields("category=food&item=password_manager&amount=5");

        assert_eq!(got, "category=food&item=password_manager&amount=5");
    }

    #[test]
    fn truncates_on_char_boundary() {
        let text = "食".repeat(LOG_BODY_LENGTH_LIMIT);

        let got = truncate_body(&text);

        assert!(got.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(got.chars().all(|c| c == '食'));
    }

    #[tokio::test]
    async fn middleware_passes_body_through() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.post("/echo").text("hello").await;

        response.assert_status_ok();
        response.assert_text("hello");
    }
}
