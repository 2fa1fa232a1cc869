mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod redirect;
mod register_user;
mod session;

pub(crate) use cookie::{
    DEFAULT_SESSION_DURATION, clear_session_cookie, read_session, set_session_cookie,
};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use password::PasswordHash;
pub use redirect::normalize_redirect_url;
pub use register_user::{get_register_page, register_user};
pub use session::SessionContext;
pub(crate) use session::SessionToken;

#[cfg(test)]
pub(crate) use cookie::SESSION_COOKIE;
