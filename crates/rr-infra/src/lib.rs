//! Infrastructure adapters for Rider Rewards.
//!
//! Implements the core HTTP ports with `reqwest` and maps the backend's
//! JSON wire format onto domain types.

pub mod api;
pub mod http;

pub use api::{HttpObjectiveFeed, HttpRegistrationGateway};
pub use http::ReqwestHttpClient;
