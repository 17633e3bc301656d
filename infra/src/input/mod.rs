//! Candidate-code input adapters

pub mod line;

pub use eo_core::services::ChannelCodeInput;
pub use line::LineCodeInput;
