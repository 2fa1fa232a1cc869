//! Defines the endpoint for appending a transaction to the ledger.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    ledger::{
        record::{Amount, LedgerDate, TransactionRecord, TransactionType},
        store::LedgerStore,
    },
};

/// The state needed to append a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub ledger: Arc<Mutex<LedgerStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The form data for recording a transaction.
///
/// The date and amount are kept as text so that invalid input can be reported
/// in an alert instead of a plain text rejection.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub amount: String,
    #[serde(rename = "type", default)]
    pub transaction_type: Option<TransactionType>,
}

impl TryFrom<TransactionForm> for TransactionRecord {
    type Error = Error;

    fn try_from(form: TransactionForm) -> Result<Self, Self::Error> {
        let date = form.date.trim().parse::<LedgerDate>()?;
        let amount = Amount::from_input(&form.amount)?;
        let transaction_type = form
            .transaction_type
            .ok_or(Error::MissingTransactionType)?;

        Ok(TransactionRecord::new(
            date.date(),
            form.category.trim(),
            form.item.trim(),
            amount,
            transaction_type,
        ))
    }
}

/// A route handler for appending a transaction, redirects to the ledger view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let record = match TransactionRecord::try_from(form) {
        Ok(record) => record,
        Err(error) => {
            tracing::warn!("rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    let store = match state.ledger.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = store
        .load()
        .and_then(|ledger| store.append(record, ledger))
    {
        tracing::error!("could not append transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::LEDGER_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
