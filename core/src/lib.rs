//! # Email OTP Core
//!
//! Core business logic for issuing and verifying email one-time passcodes.
//! This crate contains the OTP record entity and status values, the record
//! store interface with its in-memory implementation, collaborator traits,
//! and the service that drives generation and verification.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{InMemoryOtpStore, OtpStore};
pub use services::*;
