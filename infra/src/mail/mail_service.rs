//! Mail Service Interface
//!
//! Defines the trait for mail providers delivering passcode messages.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Mail service trait for sending plain-text messages
///
/// Implementations include:
/// - SMTP relay (lettre)
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a message to an email address
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient's email address
    /// * `subject` - Subject line
    /// * `body` - Plain-text message content
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider reference for the accepted message
    /// * `Err(InfrastructureError::MailRejected)` - The provider refused the message
    /// * `Err(InfrastructureError)` - Any other transport failure
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
