//! OTP store trait defining the interface for passcode record storage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::OtpRecord;
use crate::errors::StoreResult;

/// Storage of OTP records keyed by email address
///
/// The store holds at most one record per address. `set` overwrites
/// unconditionally; the session-scoped operations only touch the record
/// whose `session_id` matches, so a verification session never clobbers a
/// record issued after it started.
///
/// Implementations must be safe to share across concurrent sessions for
/// different addresses.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Look up the record for an address
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - A record exists (it may be expired or exhausted)
    /// * `Ok(None)` - No record for this address
    async fn get(&self, email: &str) -> StoreResult<Option<OtpRecord>>;

    /// Store a record, replacing any existing one
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - The record that was replaced
    /// * `Ok(None)` - No previous record existed
    async fn set(&self, email: &str, record: OtpRecord) -> StoreResult<Option<OtpRecord>>;

    /// Remove the record for an address, returning it if present
    async fn delete(&self, email: &str) -> StoreResult<Option<OtpRecord>>;

    /// Increment the attempt counter of the record issued as `session_id`
    ///
    /// # Returns
    /// * `Ok(Some(attempts))` - The new attempt count
    /// * `Ok(None)` - The record is gone or was replaced by a newer issuance
    async fn record_failed_attempt(&self, email: &str, session_id: Uuid) -> StoreResult<Option<u32>>;

    /// Remove the record issued as `session_id` after a successful match
    ///
    /// # Returns
    /// * `Ok(true)` - The record was removed
    /// * `Ok(false)` - The record is gone or was replaced by a newer issuance
    async fn consume(&self, email: &str, session_id: Uuid) -> StoreResult<bool>;

    /// Remove every record, returning how many were dropped
    async fn clear(&self) -> StoreResult<usize>;

    /// Number of stored records, live or dead
    async fn count(&self) -> StoreResult<usize>;
}
