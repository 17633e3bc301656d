//! Errors raised at the record store seam

use thiserror::Error;

/// Record store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store backend error: {message}")]
    Backend { message: String },

    #[error("Store is unavailable")]
    Unavailable,
}

pub type StoreResult<T> = Result<T, StoreError>;
