//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_register_page, post_log_in,
        register_user,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    ledger::{create_transaction_endpoint, delete_transaction_endpoint, get_ledger_page},
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LEDGER_VIEW, get(get_ledger_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/DELETE routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(
                endpoints::TRANSACTION,
                delete(delete_transaction_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the ledger page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::LEDGER_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_htmx::HX_REDIRECT;
    use axum_test::TestServer;
    use tempfile::TempDir;

    use crate::{
        AppState, endpoints, ledger::LedgerStore, routing::build_router, user::UserStore,
    };

    const TEST_COST: u32 = 4;

    fn get_test_server() -> (TempDir, TestServer) {
        let dir = TempDir::new().expect("Could not create temp dir");
        let users = UserStore::new(dir.path().join("users.csv"), TEST_COST);
        users
            .register("alice", "test", Vec::new())
            .expect("Could not create test user");
        let state = AppState::new(
            "foobar",
            "Etc/UTC",
            users,
            LedgerStore::new(dir.path().join("kakeibo.csv")),
        )
        .expect("Could not create app state");

        let mut server = TestServer::try_new(build_router(state)).expect("Could not create test server.");
        server.save_cookies();

        (dir, server)
    }

    async fn log_in(server: &TestServer) {
        server
            .post(endpoints::LOG_IN_API)
            .form(&[("username", "alice"), ("password", "test")])
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn ledger_redirects_to_log_in_without_session() {
        let (_dir, server) = get_test_server();

        let response = server.get(endpoints::LEDGER_VIEW).await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header("location");
        let location = location.to_str().unwrap();
        assert!(
            location.starts_with(endpoints::LOG_IN_VIEW),
            "want redirect to log-in page, got {location}"
        );
    }

    #[tokio::test]
    async fn transactions_api_requires_session() {
        let (_dir, server) = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("date", "2024-01-05"),
                ("category", "Food"),
                ("item", "Lunch"),
                ("amount", "1000"),
                ("type", "Expense"),
            ])
            .await;

        let redirect = response.header(HX_REDIRECT);
        assert!(
            redirect.to_str().unwrap().starts_with(endpoints::LOG_IN_VIEW),
            "want hx-redirect to log-in page, got {redirect:?}"
        );
    }

    #[tokio::test]
    async fn log_in_then_record_and_delete_transaction() {
        let (_dir, server) = get_test_server();
        log_in(&server).await;

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("date", "2024-01-05"),
                ("category", "Food"),
                ("item", "Lunch"),
                ("amount", "1000"),
                ("type", "Expense"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::LEDGER_VIEW).await;
        page.assert_status_ok();
        page.assert_text_contains("Lunch");
        page.assert_text_contains("Welcome, alice");

        server
            .delete(&endpoints::transaction_url(0))
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::LEDGER_VIEW).await;
        page.assert_status_ok();
        page.assert_text_contains("No transactions yet");
    }

    #[tokio::test]
    async fn root_redirects_to_ledger_with_session() {
        let (_dir, server) = get_test_server();
        log_in(&server).await;

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", endpoints::LEDGER_VIEW);
    }

    #[tokio::test]
    async fn log_out_ends_session() {
        let (_dir, server) = get_test_server();
        log_in(&server).await;

        server
            .get(endpoints::LOG_OUT)
            .await
            .assert_status(StatusCode::SEE_OTHER);

        server
            .get(endpoints::LEDGER_VIEW)
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (_dir, server) = get_test_server();

        server
            .get("/does-not-exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn static_files_are_served() {
        let (_dir, server) = get_test_server();

        server
            .get("/static/favicon.svg")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn public_pages_are_reachable() {
        let (_dir, server) = get_test_server();

        for endpoint in [endpoints::LOG_IN_VIEW, endpoints::REGISTER_VIEW] {
            server.get(endpoint).await.assert_status_ok();
        }

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
