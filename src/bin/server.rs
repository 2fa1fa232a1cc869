use std::{net::SocketAddr, path::PathBuf, process::ExitCode};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use kakeibo_rs::{
    AppState, LedgerStore, PasswordHash, UserStore, build_router, graceful_shutdown,
    logging_middleware,
};

/// The web server for the kakeibo household ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the users CSV file.
    #[arg(long, default_value = "users.csv")]
    users_path: PathBuf,

    /// File path to the ledger CSV file.
    #[arg(long, default_value = "kakeibo.csv")]
    ledger_path: PathBuf,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical name of the local timezone, e.g. "Asia/Tokyo".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// The secret the session cookie key is derived from.
    #[arg(long, env = "SECRET", hide_env_values = true)]
    secret: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let state = match AppState::new(
        &args.secret,
        &args.timezone,
        UserStore::new(&args.users_path, PasswordHash::DEFAULT_COST),
        LedgerStore::new(&args.ledger_path),
    ) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not start the server: {error}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "Using users file {} and ledger file {}",
        args.users_path.display(),
        args.ledger_path.display()
    );

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on {addr}");

    match axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("Server stopped unexpectedly: {error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

/// Wrap each request in a debug span that records the matched route.
fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            let matched_path = request
                .extensions()
                .get::<MatchedPath>()
                .map(MatchedPath::as_str);

            tracing::debug_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                matched_path
            )
        })
        // Server errors are logged where they are turned into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
