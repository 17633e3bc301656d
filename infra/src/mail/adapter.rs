//! Mail Service Trait Adapter
//!
//! Implements the core `MailServiceTrait` for any infrastructure mail
//! provider, folding provider errors into the core's delivered / declined /
//! faulted outcomes.

use async_trait::async_trait;
use std::sync::Arc;

use eo_core::services::MailServiceTrait;
use eo_shared::email::mask_email;

use super::mail_service::MailService;
use crate::InfrastructureError;

/// Adapter that implements the core `MailServiceTrait` for a mail provider
pub struct MailServiceAdapter<M: MailService + ?Sized> {
    inner: Arc<M>,
    subject: String,
}

impl<M: MailService + ?Sized> MailServiceAdapter<M> {
    /// Create a new adapter sending every message with `subject`
    pub fn new(inner: Arc<M>, subject: impl Into<String>) -> Self {
        Self {
            inner,
            subject: subject.into(),
        }
    }

    /// Wrapped provider
    pub fn inner(&self) -> &Arc<M> {
        &self.inner
    }
}

#[async_trait]
impl<M: MailService + ?Sized> MailServiceTrait for MailServiceAdapter<M> {
    async fn send_mail(&self, email: &str, body: &str) -> Result<bool, String> {
        match self.inner.send_mail(email, &self.subject, body).await {
            Ok(message_id) => {
                tracing::debug!(
                    provider = self.inner.provider_name(),
                    email = %mask_email(email),
                    message_id = %message_id,
                    "Mail accepted by provider"
                );
                Ok(true)
            }
            Err(InfrastructureError::MailRejected(reason)) => {
                tracing::warn!(
                    provider = self.inner.provider_name(),
                    email = %mask_email(email),
                    reason = %reason,
                    "Mail rejected by provider"
                );
                Ok(false)
            }
            Err(e) => Err(e.to_string()),
        }
    }
}
