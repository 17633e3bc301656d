//! Mail Service Module
//!
//! Mail provider implementations used to deliver passcodes, plus the adapter
//! exposing any provider through the core `MailServiceTrait`.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all mail providers
//! - **Mock Implementation**: Console output for development
//! - **SMTP Support**: Production delivery through an SMTP relay (lettre)
//! - **Security**: Email address masking in logs

pub mod adapter;
pub mod mail_service;
pub mod mock_mail;

// SMTP mail service (feature-gated)
#[cfg(feature = "smtp")]
pub mod smtp;

// Re-export commonly used types
pub use adapter::MailServiceAdapter;
pub use mail_service::MailService;
pub use mock_mail::MockMailService;

#[cfg(feature = "smtp")]
pub use smtp::SmtpMailService;

#[cfg(test)]
mod tests;

use eo_shared::MailConfig;

/// Create a mail service based on configuration
///
/// Unknown providers and providers that fail to initialise fall back to the
/// mock implementation with a warning.
pub async fn create_mail_service(config: &MailConfig) -> Box<dyn MailService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockMailService::new()),
        #[cfg(feature = "smtp")]
        "smtp" => match SmtpMailService::new(config) {
            Ok(service) => Box::new(service),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize SMTP mail service");
                tracing::warn!("Falling back to mock mail service");
                Box::new(MockMailService::new())
            }
        },
        _ => {
            tracing::warn!(
                provider = %config.provider,
                "Unknown mail provider, using mock implementation"
            );
            Box::new(MockMailService::new())
        }
    }
}
