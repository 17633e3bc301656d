//! In-memory OTP store.
//!
//! Records live for the lifetime of the process; nothing is evicted in the
//! background. Dead records are replaced by the next issuance for the same
//! address or dropped by `clear`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::OtpRecord;
use crate::errors::StoreResult;

use super::r#trait::OtpStore;

/// OTP store backed by a `HashMap` behind an async read-write lock
#[derive(Clone, Default)]
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, email: &str) -> StoreResult<Option<OtpRecord>> {
        let records = self.records.read().await;
        Ok(records.get(email).cloned())
    }

    async fn set(&self, email: &str, record: OtpRecord) -> StoreResult<Option<OtpRecord>> {
        let mut records = self.records.write().await;
        Ok(records.insert(email.to_string(), record))
    }

    async fn delete(&self, email: &str) -> StoreResult<Option<OtpRecord>> {
        let mut records = self.records.write().await;
        Ok(records.remove(email))
    }

    async fn record_failed_attempt(&self, email: &str, session_id: Uuid) -> StoreResult<Option<u32>> {
        let mut records = self.records.write().await;
        match records.get_mut(email) {
            Some(record) if record.session_id == session_id => {
                record.attempts += 1;
                Ok(Some(record.attempts))
            }
            _ => Ok(None),
        }
    }

    async fn consume(&self, email: &str, session_id: Uuid) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        match records.get(email) {
            Some(record) if record.session_id == session_id => {
                records.remove(email);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear(&self) -> StoreResult<usize> {
        let mut records = self.records.write().await;
        let dropped = records.len();
        records.clear();
        Ok(dropped)
    }

    async fn count(&self) -> StoreResult<usize> {
        let records = self.records.read().await;
        Ok(records.len())
    }
}
