//! Configuration loading
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults and plain environment variables (`OTP_MAX_ATTEMPTS`,
//!    `SMTP_HOST`, ...), read through `AppConfig::from_env`
//! 2. An optional `config.<environment>.toml` file in the working directory
//! 3. `APP_`-prefixed variables with `__` as the section separator, e.g.
//!    `APP_OTP__MAX_ATTEMPTS=5` or `APP_MAIL__PROVIDER=smtp`

use config::{Config, Environment as EnvironmentSource, File};
use eo_shared::validation::Validate;
use eo_shared::AppConfig;

use crate::InfrastructureError;

/// Prefix of layered environment overrides
pub const ENV_PREFIX: &str = "APP";

/// Load and validate the application configuration
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let base = AppConfig::from_env();
    let config_file = base.environment.config_file().to_string();

    let config = Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name(&config_file).required(false))
        .add_source(
            EnvironmentSource::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    validate(&app_config)?;

    tracing::debug!(
        environment = %app_config.environment,
        config_file = %config_file,
        mail_provider = %app_config.mail.provider,
        "Configuration loaded"
    );

    Ok(app_config)
}

/// Reject configurations the services cannot run with
pub fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    config
        .validate()
        .map_err(|errors| InfrastructureError::Config(errors.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eo_shared::MailConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_smtp_without_host_is_rejected() {
        let mut config = AppConfig::default();
        config.mail = MailConfig {
            provider: "smtp".to_string(),
            ..MailConfig::default()
        };

        match validate(&config) {
            Err(InfrastructureError::Config(message)) => assert!(message.contains("smtp_host")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let mut config = AppConfig::default();
        config.otp.max_attempts = 0;
        assert!(validate(&config).is_err());
    }
}
