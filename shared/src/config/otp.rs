//! One-time passcode policy configuration

use serde::{Deserialize, Serialize};

use crate::utils::validation::{Validate, ValidationErrors};

/// Default validity window of an issued code in seconds
pub const DEFAULT_CODE_VALIDITY_SECONDS: u64 = 60;

/// Upper bound accepted for the validity window (one day)
pub const MAX_CODE_VALIDITY_SECONDS: u64 = 86_400;

/// Default number of wrong guesses allowed per issued code
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default suffix an address must end with to receive a code
pub const DEFAULT_REQUIRED_DOMAIN: &str = "@dso.org.sg";

/// OTP policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds an issued code stays valid
    #[serde(default = "default_validity")]
    pub code_validity_seconds: u64,

    /// Wrong guesses allowed before the code is dead
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Required address suffix (domain allow-list)
    #[serde(default = "default_required_domain")]
    pub required_domain: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_validity_seconds: default_validity(),
            max_attempts: default_max_attempts(),
            required_domain: default_required_domain(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let code_validity_seconds = std::env::var("OTP_VALIDITY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CODE_VALIDITY_SECONDS);
        let max_attempts = std::env::var("OTP_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        let required_domain = std::env::var("OTP_REQUIRED_DOMAIN")
            .unwrap_or_else(|_| DEFAULT_REQUIRED_DOMAIN.to_string());

        Self {
            code_validity_seconds,
            max_attempts,
            required_domain,
        }
    }

    /// Set the required address suffix
    pub fn with_required_domain(mut self, domain: impl Into<String>) -> Self {
        self.required_domain = domain.into();
        self
    }
}

impl Validate for OtpConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.code_validity_seconds == 0 || self.code_validity_seconds > MAX_CODE_VALIDITY_SECONDS {
            errors.add_error(
                "otp.code_validity_seconds",
                "Code validity must be between one second and one day",
                "out_of_range",
            );
        }
        if self.max_attempts == 0 {
            errors.add_error(
                "otp.max_attempts",
                "At least one verification attempt must be allowed",
                "out_of_range",
            );
        }
        if !self.required_domain.starts_with('@') || self.required_domain.len() < 2 {
            errors.add_error(
                "otp.required_domain",
                "Required domain must look like '@example.com'",
                "invalid_format",
            );
        }

        if errors.has_errors() {
            Err(errors)
        } else {
            Ok(())
        }
    }
}

fn default_validity() -> u64 {
    DEFAULT_CODE_VALIDITY_SECONDS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_required_domain() -> String {
    DEFAULT_REQUIRED_DOMAIN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy() {
        let config = OtpConfig::default();
        assert_eq!(config.code_validity_seconds, 60);
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.required_domain, "@dso.org.sg");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_domain_without_at_sign() {
        let config = OtpConfig::default().with_required_domain("dso.org.sg");
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.errors()[0].field, "otp.required_domain");
    }
}
