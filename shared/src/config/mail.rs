//! Mail delivery configuration module

use serde::{Deserialize, Serialize};

use crate::utils::validation::{Validate, ValidationErrors};

/// Mail delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider ("smtp", "mock")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// SMTP relay host
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP relay port (submission port by default)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    #[serde(default)]
    pub smtp_username: String,

    /// SMTP password
    #[serde(default)]
    pub smtp_password: String,

    /// Sender address
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Subject line of passcode mails
    #[serde(default = "default_subject")]
    pub subject: String,

    /// SMTP command timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
            subject: default_subject(),
            timeout_secs: default_timeout(),
        }
    }
}

impl MailConfig {
    /// Create an SMTP configuration for the given relay
    pub fn smtp(host: impl Into<String>, port: u16) -> Self {
        Self {
            provider: String::from("smtp"),
            smtp_host: host.into(),
            smtp_port: port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or(defaults.provider),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.smtp_port),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: std::env::var("MAIL_FROM").unwrap_or(defaults.from_address),
            subject: std::env::var("MAIL_SUBJECT").unwrap_or(defaults.subject),
            timeout_secs: std::env::var("SMTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Set SMTP credentials
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.smtp_username = username.into();
        self.smtp_password = password.into();
        self
    }
}

impl Validate for MailConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.provider == "smtp" && self.smtp_host.trim().is_empty() {
            errors.add_error("mail.smtp_host", "SMTP host is required", "required");
        }
        if !self.from_address.contains('@') {
            errors.add_error("mail.from_address", "Sender address is invalid", "invalid_format");
        }

        if errors.has_errors() {
            Err(errors)
        } else {
            Ok(())
        }
    }
}

fn default_provider() -> String {
    String::from("mock")
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    String::from("no-reply@dso.org.sg")
}

fn default_subject() -> String {
    String::from("Your one-time passcode")
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_constructor() {
        let config = MailConfig::smtp("smtp.dso.org.sg", 465).with_credentials("otp", "secret");
        assert_eq!(config.provider, "smtp");
        assert_eq!(config.smtp_port, 465);
        assert_eq!(config.smtp_username, "otp");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_smtp_without_host_is_invalid() {
        let config = MailConfig::smtp("", 587);
        assert!(config.validate().is_err());
    }
}
