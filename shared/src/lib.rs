//! Shared utilities and common types for the email OTP services
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types (OTP policy, mail delivery, logging, environment)
//! - Validation helpers (email syntax, domain allow-list, config validation)
//! - Log-safe masking of email addresses

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, MailConfig, OtpConfig};
pub use utils::{email, validation};
