//! Configuration for the email OTP service

use chrono::Duration;
use eo_shared::config::otp::{
    OtpConfig, DEFAULT_CODE_VALIDITY_SECONDS, DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUIRED_DOMAIN,
    MAX_CODE_VALIDITY_SECONDS,
};

/// Configuration for the email OTP service
#[derive(Debug, Clone)]
pub struct EmailOtpServiceConfig {
    /// Number of seconds before an issued code expires
    pub code_validity_seconds: u64,
    /// Wrong guesses allowed per issued code
    pub max_attempts: u32,
    /// Suffix an address must end with, e.g. `@dso.org.sg`
    pub required_domain: String,
}

impl EmailOtpServiceConfig {
    /// Validity window as a chrono duration, capped at one day
    pub fn validity(&self) -> Duration {
        Duration::seconds(self.code_validity_seconds.min(MAX_CODE_VALIDITY_SECONDS) as i64)
    }
}

impl Default for EmailOtpServiceConfig {
    fn default() -> Self {
        Self {
            code_validity_seconds: DEFAULT_CODE_VALIDITY_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            required_domain: DEFAULT_REQUIRED_DOMAIN.to_string(),
        }
    }
}

impl From<&OtpConfig> for EmailOtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_validity_seconds: config.code_validity_seconds,
            max_attempts: config.max_attempts,
            required_domain: config.required_domain.clone(),
        }
    }
}
