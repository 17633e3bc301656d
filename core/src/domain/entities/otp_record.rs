//! OTP record entity for email-based passcodes.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Stored state of one issued passcode
///
/// At most one record exists per email address. Regeneration replaces it,
/// a successful verification removes it. A record whose expiry has passed or
/// whose attempts reached the cap stays in the store but can never verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Identifies this issuance; a newer record for the same address has a new id
    pub session_id: Uuid,

    /// The numeric passcode
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// The record is unusable at or after this instant
    pub expires_at: DateTime<Utc>,

    /// Number of failed comparisons so far
    pub attempts: u32,
}

impl OtpRecord {
    /// Creates a fresh record with zero attempts
    ///
    /// # Arguments
    ///
    /// * `code` - The passcode delivered to the user
    /// * `issued_at` - Issuance time, taken from the service clock
    /// * `validity` - How long the code stays usable
    pub fn new(code: String, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            code,
            created_at: issued_at,
            expires_at: issued_at + validity,
            attempts: 0,
        }
    }

    /// Checks if the record has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Compares a candidate against the stored code in constant time
    ///
    /// Exact byte equality: no trimming, no case folding.
    pub fn matches(&self, candidate: &str) -> bool {
        if candidate.len() != self.code.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Gets the number of remaining verification attempts (0 if exhausted)
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(now: DateTime<Utc>) -> OtpRecord {
        OtpRecord::new("042917".to_string(), now, Duration::seconds(60))
    }

    #[test]
    fn test_new_record() {
        let now = Utc::now();
        let record = record_at(now);

        assert_eq!(record.attempts, 0);
        assert_eq!(record.created_at, now);
        assert_eq!(record.expires_at, now + Duration::seconds(60));
        assert!(!record.is_expired_at(now));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let record = record_at(now);

        assert!(!record.is_expired_at(now + Duration::seconds(59)));
        assert!(record.is_expired_at(now + Duration::seconds(60)));
        assert!(record.is_expired_at(now + Duration::seconds(61)));
    }

    #[test]
    fn test_matches_is_exact() {
        let record = record_at(Utc::now());

        assert!(record.matches("042917"));
        assert!(!record.matches("42917"));
        assert!(!record.matches(" 042917"));
        assert!(!record.matches("042917\n"));
        assert!(!record.matches("042918"));
        assert!(!record.matches(""));
    }

    #[test]
    fn test_remaining_attempts_saturate() {
        let now = Utc::now();
        let mut record = record_at(now);
        record.attempts = 9;
        assert_eq!(record.remaining_attempts(10), 1);

        record.attempts = 10;
        assert_eq!(record.remaining_attempts(10), 0);

        record.attempts = 12;
        assert_eq!(record.remaining_attempts(10), 0);
    }

    #[test]
    fn test_time_until_expiration() {
        let now = Utc::now();
        let record = record_at(now);

        assert_eq!(record.time_until_expiration(now), Duration::seconds(60));
        assert_eq!(
            record.time_until_expiration(now + Duration::seconds(90)),
            Duration::zero()
        );
    }

    #[test]
    fn test_each_record_gets_its_own_session() {
        let now = Utc::now();
        assert_ne!(record_at(now).session_id, record_at(now).session_id);
    }
}
