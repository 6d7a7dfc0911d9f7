//! Backend API adapters.

pub mod objectives;
pub mod registration;

pub use objectives::HttpObjectiveFeed;
pub use registration::HttpRegistrationGateway;

/// Joins the API base URL and an endpoint path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
