//! Email OTP service module
//!
//! This module provides the complete passcode workflow:
//! - Address validation and domain allow-listing
//! - Secure code generation and storage with expiry
//! - Delivery through a pluggable mail gateway
//! - Verification racing candidate input against the expiry deadline,
//!   with an attempt cap and per-address session serialization

mod config;
pub mod generator;
mod input;
mod service;
mod session_lock;
mod traits;
mod types;


pub use config::EmailOtpServiceConfig;
pub use input::ChannelCodeInput;
pub use service::EmailOtpService;
pub use traits::{AddressValidator, Clock, CodeInput, MailServiceTrait, SyntaxAddressValidator, SystemClock};
pub use types::{SendCodeResult, VerifyCodeResult};
