//! Types for OTP service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of issuing and delivering a code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Session identifier of the stored record
    pub session_id: Uuid,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyCodeResult {
    /// Session identifier of the consumed record
    pub session_id: Uuid,
    /// Wrong attempts made before the match
    pub failed_attempts: u32,
}
