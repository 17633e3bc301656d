//! Value objects representing immutable domain concepts.

pub mod status;

// Re-export commonly used types
pub use status::{EmailStatus, OtpStatus};
