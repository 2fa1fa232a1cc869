//! Route paths, shared by the router and the links and forms that point at it.

/// The root route which redirects to the ledger or log in page.
pub const ROOT: &str = "/";
/// The page with the entry form, transaction list, summaries and trend chart.
pub const LEDGER_VIEW: &str = "/ledger";
/// The page for creating a new user.
pub const REGISTER_VIEW: &str = "/register";
/// The page for logging in.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for checking credentials and setting the session cookie.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for clearing the session cookie.
pub const LOG_OUT: &str = "/api/log_out";
/// The route for registering users.
pub const USERS: &str = "/api/users";
/// The route for appending transactions to the ledger.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for deleting the transaction at a position in the ledger.
pub const TRANSACTION: &str = "/api/transactions/{index}";

/// Replace the parameter in `endpoint_path` with `/// The URL that deletes the transaction at `index` in the ledger, matching [TRANSACTION].
pub fn transaction_url(index: usize) -> String {
    TRANSACTION.replace("{index}", &index.to_string())
}
