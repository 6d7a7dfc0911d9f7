//! Registration gateway port
//!
//! Server side of the registration wizard: phone challenge, code validation
//! and the final registration. Implementations classify non-success
//! responses into the matching [`RemoteError`] rejection.

use async_trait::async_trait;

use super::errors::RemoteError;
use crate::registration::RegistrationForm;

#[async_trait]
pub trait RegistrationGatewayPort: Send + Sync {
    /// Sends the SMS challenge and returns the code the server expects back.
    async fn send_phone_challenge(&self, phone: &str) -> Result<String, RemoteError>;

    /// Confirms the code the rider typed.
    async fn validate_code(&self, phone: &str, code: &str) -> Result<(), RemoteError>;

    /// Submits the complete form.
    async fn register(&self, form: &RegistrationForm) -> Result<(), RemoteError>;
}
