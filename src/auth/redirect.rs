//! Helpers for the URL to return to after logging in.

use axum::{extract::Request, http::Uri};
use tracing::{error, warn};

use crate::endpoints;

/// Only paths on this site that are not the auth pages themselves are safe.
fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(redirect_url);

    path != endpoints::LOG_IN_VIEW && path != endpoints::REGISTER_VIEW
}

/// Reduce `raw_url` to a safe path and query, or `None` if it points elsewhere.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }

    safe_path_and_query(&uri)
}

/// Like [normalize_redirect_url], but for the absolute URL in the `HX-Current-URL` header.
fn normalize_hx_current_url(raw_url: &str) -> Option<String> {
    raw_url
        .parse::<Uri>()
        .ok()
        .and_then(|uri| safe_path_and_query(&uri))
}

fn safe_path_and_query(uri: &Uri) -> Option<String> {
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// The log-in page URL that returns the client to where `request` was headed.
///
/// Requests to `/api` come from htmx, so the page the client was on is read
/// from the `HX-Current-URL` header instead of the request URI.
pub fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let redirect_target = if request.uri().path().starts_with("/api") {
        redirect_target_from_hx_request(request)?
    } else {
        request
            .uri()
            .path_and_query()
            .and_then(|path_and_query| normalize_redirect_url(path_and_query.as_str()))?
    };

    build_log_in_redirect_url_from_target(&redirect_target)
}

pub(super) fn build_log_in_redirect_url_from_target(redirect_target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("redirect_url", redirect_target)]) {
        Ok(param) => Some(format!("{}?{}", endpoints::LOG_IN_VIEW, param)),
        Err(error) => {
            error!("Could not encode redirect URL {redirect_target}: {error}");
            None
        }
    }
}

fn redirect_target_from_hx_request(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_hx_request = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"));

    if !is_hx_request {
        warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    else {
        warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    let redirect_url = normalize_hx_current_url(current_url);
    if redirect_url.is_none() {
        warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    redirect_url
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, extract::Request};

    use crate::endpoints;

    use super::{build_log_in_redirect_url, normalize_redirect_url};

    #[test]
    fn keeps_local_path_and_query() {
        assert_eq!(
            normalize_redirect_url("/ledger?x=1"),
            Some("/ledger?x=1".to_owned())
        );
    }

    #[test]
    fn rejects_other_sites() {
        assert_eq!(normalize_redirect_url("https://example.com/ledger"), None);
        assert_eq!(normalize_redirect_url("//example.com/ledger"), None);
    }

    #[test]
    fn rejects_auth_pages() {
        assert_eq!(normalize_redirect_url(endpoints::LOG_IN_VIEW), None);
        assert_eq!(normalize_redirect_url(endpoints::REGISTER_VIEW), None);
    }

    #[test]
    fn api_request_uses_hx_current_url() {
        let request = Request::builder()
            .uri(endpoints::TRANSACTIONS_API)
            .header("HX-Request", "true")
            .header("HX-Current-URL", "http://localhost:3000/ledger")
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            build_log_in_redirect_url(&request),
            Some(format!("{}?redirect_url=%2Fledger", endpoints::LOG_IN_VIEW))
        );
    }

    #[test]
    fn api_request_without_htmx_headers_has_no_target() {
        let request = Request::builder()
            .uri(endpoints::TRANSACTIONS_API)
            .body(Body::empty())
            .unwrap();

        assert_eq!(build_log_in_redirect_url(&request), None);
    }
}
