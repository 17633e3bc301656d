//! # Infrastructure Layer
//!
//! Concrete implementations behind the email OTP core:
//! - **Mail**: mail providers (SMTP via lettre, mock) and the adapter to the
//!   core mail trait
//! - **Input**: candidate-code sources reading lines from a terminal or socket
//! - **Settings**: layered configuration loading (.env, config file, environment)
//! - **Telemetry**: tracing subscriber initialisation
//!
//! ## Features
//!
//! - `smtp`: Enable the lettre SMTP provider (default)

use std::sync::Arc;

use eo_core::repositories::InMemoryOtpStore;
use eo_core::services::{EmailOtpService, EmailOtpServiceConfig};
use eo_shared::AppConfig;

// Re-export core types for convenience
pub use eo_core::errors::*;

/// Mail service module - mail providers and core adapter
pub mod mail;

/// Candidate-code input adapters
pub mod input;

/// Configuration loading
pub mod settings;

/// Tracing subscriber setup
pub mod telemetry;

use mail::{MailService, MailServiceAdapter};

/// OTP service wired with the configured mail provider and in-memory store
pub type OtpService = EmailOtpService<MailServiceAdapter<dyn MailService>, InMemoryOtpStore>;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Loaded application configuration
    pub config: AppConfig,
    /// Mail provider selected by configuration
    pub mail_service: Arc<dyn MailService>,
    /// Ready-to-use OTP service
    pub otp_service: Arc<OtpService>,
}

impl InfrastructureServices {
    /// Wire services from an already loaded configuration
    pub async fn from_config(config: AppConfig) -> Self {
        let mail_service: Arc<dyn MailService> = Arc::from(mail::create_mail_service(&config.mail).await);
        Self::with_mail_service(config, mail_service)
    }

    /// Wire services around a given mail provider
    pub fn with_mail_service(config: AppConfig, mail_service: Arc<dyn MailService>) -> Self {
        let adapter = MailServiceAdapter::new(mail_service.clone(), config.mail.subject.clone());
        let otp_service = EmailOtpService::new(
            Arc::new(adapter),
            Arc::new(InMemoryOtpStore::new()),
            EmailOtpServiceConfig::from(&config.otp),
        );

        Self {
            config,
            mail_service,
            otp_service: Arc::new(otp_service),
        }
    }

    /// Health check of the mail provider, logged at startup
    ///
    /// An unavailable provider is not fatal: codes are still issued and
    /// stored, generation just reports `STATUS_EMAIL_FAIL`.
    pub async fn check_mail_provider(&self) -> bool {
        let provider = self.mail_service.provider_name();
        let available = self.mail_service.is_available().await;
        if available {
            tracing::info!(provider = provider, event = "mail_provider_ready", "Mail provider available");
        } else {
            tracing::warn!(
                provider = provider,
                event = "mail_provider_unavailable",
                "Mail provider unavailable, passcode delivery will fail"
            );
        }
        available
    }
}

/// Initialize infrastructure services
///
/// This function:
/// - Loads configuration from `.env`, the environment's config file and `APP_` variables
/// - Selects the mail provider
/// - Builds the OTP service and marks it started
pub async fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let config = settings::load_config()?;
    let services = InfrastructureServices::from_config(config).await;
    services.check_mail_provider().await;
    services.otp_service.start();

    tracing::info!(
        environment = %services.config.environment,
        mail_provider = services.mail_service.provider_name(),
        "Infrastructure services initialized successfully"
    );

    Ok(services)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail transport or provider fault
    #[error("Mail service error: {0}")]
    Mail(String),

    /// The provider refused the message
    #[error("Mail rejected: {0}")]
    MailRejected(String),

    /// Candidate input could not be read
    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(e: config::ConfigError) -> Self {
        InfrastructureError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mail::MockMailService;

    #[tokio::test]
    async fn test_check_mail_provider_reports_availability() {
        let healthy = InfrastructureServices::with_mail_service(
            AppConfig::default(),
            Arc::new(MockMailService::with_options(false, false)),
        );
        assert!(healthy.check_mail_provider().await);

        let failing = InfrastructureServices::with_mail_service(
            AppConfig::default(),
            Arc::new(MockMailService::with_options(false, true)),
        );
        assert!(!failing.check_mail_provider().await);
    }
}
