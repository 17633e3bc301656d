//! Traits for the collaborators of the OTP service

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for mail delivery integration
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Deliver a message to an email address
    ///
    /// * `Ok(true)` - The message was accepted for delivery
    /// * `Ok(false)` - The gateway declined the message
    /// * `Err(_)` - The gateway faulted
    async fn send_mail(&self, email: &str, body: &str) -> Result<bool, String>;
}

/// Syntax check applied to addresses before a code is issued
pub trait AddressValidator: Send + Sync {
    /// Check if the raw address is a well-formed email address
    fn is_valid_address(&self, raw: &str) -> bool;
}

/// Address validator backed by the shared email syntax check
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxAddressValidator;

impl AddressValidator for SyntaxAddressValidator {
    fn is_valid_address(&self, raw: &str) -> bool {
        eo_shared::email::is_valid_email(raw)
    }
}

/// Source of wall-clock time for expiry decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock reading the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of candidate codes typed by the user
///
/// Each call yields one candidate and may suspend for as long as the user
/// takes. The verification deadline bounds the wait, so implementations do
/// not need their own timeout.
#[async_trait]
pub trait CodeInput: Send {
    /// Read the next candidate; an error counts as a wrong attempt
    async fn read_code(&mut self) -> Result<String, String>;
}
