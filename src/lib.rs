//! Kakeibo is a small web app for keeping a household ledger.
//!
//! Users register and log in, record dated income and expense entries, and
//! see category totals, an income/expense/balance summary and a monthly
//! balance trend. Users and transactions are kept in two flat CSV files that
//! are read on every request and rewritten in full on every change.
//!
//! Every route renders HTML on the server; the browser side is htmx.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod ledger;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod table;
mod timezone;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{PasswordHash, SessionContext};
pub use error::Error;
pub use ledger::{
    Amount, CategoryTotal, Field, LedgerDate, LedgerStore, MonthlyBalance, Summary,
    TransactionRecord, TransactionType, category_totals, income_expense_balance, monthly_trend,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use user::{UserRecord, UserStore, authenticate, user_exists};

/// How long in-flight requests get to finish once shutdown starts.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Wait for Ctrl+C or, on Unix, SIGTERM, then tell the server behind `handle`
/// to stop accepting connections and finish what it has.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let signal_name = tokio::select! {
        () = ctrl_c() => "Ctrl+C",
        () = terminate() => "SIGTERM",
    };

    tracing::info!("Received {signal_name}, shutting down.");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}

async fn ctrl_c() {
    if let Err(error) = signal::ctrl_c().await {
        tracing::error!("Could not listen for Ctrl+C: {error}");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(error) => {
            tracing::error!("Could not listen for SIGTERM: {error}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
