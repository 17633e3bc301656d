//! Error taxonomy of the OTP lifecycle.

mod types;


pub use types::{StoreError, StoreResult};

use thiserror::Error;

use crate::domain::value_objects::{EmailStatus, OtpStatus};

/// Errors surfaced by passcode generation and verification
///
/// The status-returning operations fold these into `EmailStatus` and
/// `OtpStatus`; the detailed operations return them as-is.
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Invalid email address")]
    InvalidAddress,

    #[error("Email domain not allowed, address must end with {required}")]
    DomainNotAllowed { required: String },

    #[error("Failed to deliver passcode: {reason}")]
    DeliveryFailure { reason: String },

    #[error("No passcode issued for this address")]
    NoSuchSession,

    #[error("Passcode expired")]
    Expired,

    #[error("Verification window closed before a match")]
    WindowClosed,

    #[error("Maximum attempts exceeded ({attempts})")]
    AttemptsExhausted { attempts: u32 },

    #[error("Passcode was replaced or revoked during verification")]
    Superseded,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OtpError {
    /// Status reported by `generate_otp_email` for this error
    pub fn email_status(&self) -> EmailStatus {
        match self {
            OtpError::InvalidAddress | OtpError::DomainNotAllowed { .. } => EmailStatus::Invalid,
            _ => EmailStatus::Fail,
        }
    }

    /// Status reported by `check_otp` for this error
    pub fn otp_status(&self) -> OtpStatus {
        match self {
            OtpError::Expired => OtpStatus::Timeout,
            _ => OtpStatus::Fail,
        }
    }
}

pub type OtpResult<T> = Result<T, OtpError>;
