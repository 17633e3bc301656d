//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Mail delivery provider and SMTP settings
//! - `otp` - One-time passcode policy (validity window, attempt cap, domain)

pub mod environment;
pub mod mail;
pub mod otp;

use serde::{Deserialize, Serialize};

use crate::utils::validation::{Validate, ValidationErrors};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::MailConfig;
pub use otp::OtpConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// OTP policy configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Mail delivery configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            otp: OtpConfig::default(),
            mail: MailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            otp: OtpConfig::default(),
            mail: MailConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            otp: OtpConfig::default(),
            mail: MailConfig::smtp("localhost", 587),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from plain environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            otp: OtpConfig::from_env(),
            mail: MailConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(otp_errors) = self.otp.validate() {
            errors.extend(otp_errors);
        }
        if let Err(mail_errors) = self.mail.validate() {
            errors.extend(mail_errors);
        }

        if errors.has_errors() {
            Err(errors)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.otp.code_validity_seconds, 60);
        assert_eq!(config.mail.provider, "mock");
    }

    #[test]
    fn test_production_uses_smtp() {
        let config = AppConfig::production();
        assert!(config.environment.is_production());
        assert_eq!(config.mail.provider, "smtp");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_validation_collects_nested_errors() {
        let mut config = AppConfig::default();
        config.otp.max_attempts = 0;
        config.mail.provider = "smtp".to_string();
        config.mail.smtp_host = String::new();

        let errors = config.validate().unwrap_err();
        let fields = errors.to_field_errors();
        assert!(fields.contains_key("otp.max_attempts"));
        assert!(fields.contains_key("mail.smtp_host"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppConfig =
            serde_json::from_str(r#"{"otp": {"max_attempts": 5}}"#).unwrap();
        assert_eq!(config.otp.max_attempts, 5);
        assert_eq!(config.otp.code_validity_seconds, 60);
        assert_eq!(config.otp.required_domain, "@dso.org.sg");
    }
}
