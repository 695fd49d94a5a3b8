//! REST clients for the hospital content API
//!
//! - [`AdminClient`] - authenticated calls behind [`AdminApi`], used by the console
//! - [`PublicClient`] - unauthenticated, TTL-cached reads used by the microsite

pub mod admin;
pub mod error;
pub mod public;

pub use admin::{
    ActionReceipt, AdminApi, AdminClient, ScheduleRequest, ScheduleSummary, ADMIN_KEY_HEADER,
};
pub use error::ApiError;
pub use public::PublicClient;

/// Join a base URL and an absolute path without doubling the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
