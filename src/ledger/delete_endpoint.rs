use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, Error, endpoints, ledger::store::LedgerStore};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    ledger: Arc<Mutex<LedgerStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for deleting the transaction at `index`, redirects to the ledger view on success.
///
/// Positions shift after a delete, so the client reloads the whole page
/// instead of removing a single table row.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(index): Path<usize>,
) -> Response {
    let store = match state.ledger.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store
        .load()
        .and_then(|ledger| store.delete_at(index, ledger))
    {
        Ok(_) => {
            tracing::info!("deleted transaction at position {index}");
            (
                HxRedirect(endpoints::LEDGER_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {index}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::delete};
    use axum_htmx::HX_REDIRECT;
    use axum_test::TestServer;
    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        endpoints::{self, transaction_url},
        ledger::{
            record::{Amount, TransactionRecord, TransactionType},
            store::LedgerStore,
        },
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn get_test_server() -> (TempDir, LedgerStore, TestServer) {
        let dir = TempDir::new().expect("Could not create temp dir");
        let store = LedgerStore::new(dir.path().join("kakeibo.csv"));
        let state = DeleteTransactionState {
            ledger: Arc::new(Mutex::new(store.clone())),
        };
        let app = Router::new()
            .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
            .with_state(state);
        let server = TestServer::try_new(app).expect("Could not create test server.");

        (dir, store, server)
    }

    fn record(item: &str) -> TransactionRecord {
        TransactionRecord::new(
            date!(2024 - 01 - 05),
            "Food",
            item,
            Amount::from_input("1000").unwrap(),
            TransactionType::Expense,
        )
    }

    #[tokio::test]
    async fn deletes_transaction_at_position() {
        let (_dir, store, server) = get_test_server();
        store
            .save(&[record("Breakfast"), record("Lunch"), record("Dinner")])
            .unwrap();

        let response = server
            .delete(&transaction_url(1))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(HX_REDIRECT, endpoints::LEDGER_VIEW);

        let items = store
            .load()
            .unwrap()
            .into_iter()
            .map(|record| record.item)
            .collect::<Vec<_>>();
        assert_eq!(items, vec!["Breakfast", "Dinner"]);
    }

    #[tokio::test]
    async fn out_of_range_position_is_not_found() {
        let (_dir, store, server) = get_test_server();
        store.save(&[record("Lunch")]).unwrap();

        let response = server
            .delete(&transaction_url(1))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_text_contains("Could not delete transaction");
        assert_eq!(store.load().unwrap(), vec![record("Lunch")]);
    }
}
