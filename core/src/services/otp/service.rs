//! Main email OTP service implementation

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use eo_shared::email::{has_required_domain, mask_email};

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::{EmailStatus, OtpStatus};
use crate::errors::{OtpError, OtpResult};
use crate::repositories::otp::OtpStore;

use super::config::EmailOtpServiceConfig;
use super::generator::{compose_message, generate_secure_code};
use super::session_lock::SessionLocks;
use super::traits::{AddressValidator, Clock, CodeInput, MailServiceTrait, SyntaxAddressValidator, SystemClock};
use super::types::{SendCodeResult, VerifyCodeResult};

/// Service issuing and verifying email one-time passcodes
pub struct EmailOtpService<M: MailServiceTrait, S: OtpStore> {
    /// Mail gateway used to deliver codes
    mail_service: Arc<M>,
    /// Record store, one record per address
    store: Arc<S>,
    /// Address syntax check
    validator: Arc<dyn AddressValidator>,
    /// Time source for expiry decisions
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: EmailOtpServiceConfig,
    /// Per-address verification session locks
    sessions: SessionLocks,
}

impl<M: MailServiceTrait, S: OtpStore> EmailOtpService<M, S> {
    /// Create a new OTP service with the default validator and system clock
    ///
    /// # Arguments
    ///
    /// * `mail_service` - Mail gateway implementation
    /// * `store` - Record store implementation
    /// * `config` - Service configuration
    pub fn new(mail_service: Arc<M>, store: Arc<S>, config: EmailOtpServiceConfig) -> Self {
        Self {
            mail_service,
            store,
            validator: Arc::new(SyntaxAddressValidator),
            clock: Arc::new(SystemClock),
            config,
            sessions: SessionLocks::new(),
        }
    }

    /// Replace the address validator
    pub fn with_validator(mut self, validator: Arc<dyn AddressValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Service configuration
    pub fn config(&self) -> &EmailOtpServiceConfig {
        &self.config
    }

    /// Mark the module as started
    pub fn start(&self) {
        tracing::info!(
            event = "otp_module_started",
            validity_seconds = self.config.code_validity_seconds,
            max_attempts = self.config.max_attempts,
            required_domain = %self.config.required_domain,
            "OTP module started"
        );
    }

    /// Drop every stored record and mark the module as shut down
    ///
    /// Sessions still in flight observe their record vanish and resolve as
    /// failures.
    pub async fn close(&self) {
        match self.store.clear().await {
            Ok(dropped) => tracing::info!(
                event = "otp_module_closed",
                dropped_records = dropped,
                "OTP module shut down"
            ),
            Err(e) => tracing::error!(
                event = "otp_module_close_failed",
                error = %e,
                "Failed to clear OTP records on shutdown"
            ),
        }
    }

    /// Issue a code for an address and report the outcome as a status
    pub async fn generate_otp_email(&self, email: &str) -> EmailStatus {
        match self.send_code(email).await {
            Ok(_) => EmailStatus::Ok,
            Err(e) => e.email_status(),
        }
    }

    /// Verify candidates from `input` and report the outcome as a status
    pub async fn check_otp<I>(&self, email: &str, input: &mut I) -> OtpStatus
    where
        I: CodeInput + ?Sized,
    {
        match self.verify_code(email, input).await {
            Ok(_) => OtpStatus::Ok,
            Err(e) => e.otp_status(),
        }
    }

    /// Issue a code for an address
    ///
    /// This method:
    /// 1. Validates the address syntax
    /// 2. Checks the address against the required domain
    /// 3. Generates a new code
    /// 4. Stores it, replacing any previous record for the address
    /// 5. Sends the code by mail
    ///
    /// The record is kept even when delivery fails.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Code stored and accepted by the mail gateway
    /// * `Err(OtpError)` - Address rejected, storage failed or delivery failed
    pub async fn send_code(&self, email: &str) -> OtpResult<SendCodeResult> {
        let masked = mask_email(email);

        if !self.validator.is_valid_address(email) {
            tracing::warn!(email = %masked, event = "email_invalid", "Rejected malformed email address");
            return Err(OtpError::InvalidAddress);
        }

        if !has_required_domain(email, &self.config.required_domain) {
            tracing::warn!(
                email = %masked,
                event = "email_domain_rejected",
                required_domain = %self.config.required_domain,
                "Rejected email address outside the allowed domain"
            );
            return Err(OtpError::DomainNotAllowed {
                required: self.config.required_domain.clone(),
            });
        }

        let record = OtpRecord::new(generate_secure_code(), self.clock.now(), self.config.validity());
        let message = compose_message(&record.code, self.config.code_validity_seconds);
        let result = SendCodeResult {
            session_id: record.session_id,
            expires_at: record.expires_at,
        };

        let replaced = self.store.set(email, record).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store OTP record"
            );
            OtpError::from(e)
        })?;

        if let Some(previous) = replaced {
            tracing::info!(
                email = %masked,
                event = "otp_replaced",
                previous_session_id = %previous.session_id,
                "Replaced previous OTP record"
            );
        }

        tracing::info!(
            email = %masked,
            event = "otp_generated",
            session_id = %result.session_id,
            expires_at = %result.expires_at,
            "Generated new OTP"
        );

        match self.mail_service.send_mail(email, &message).await {
            Ok(true) => {
                tracing::info!(email = %masked, event = "otp_delivered", "OTP mail delivered");
                Ok(result)
            }
            Ok(false) => {
                tracing::warn!(
                    email = %masked,
                    event = "otp_delivery_failed",
                    "Mail gateway declined the OTP mail"
                );
                Err(OtpError::DeliveryFailure {
                    reason: "mail gateway declined the message".to_string(),
                })
            }
            Err(e) => {
                tracing::error!(
                    email = %masked,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Mail gateway failed while sending the OTP mail"
                );
                Err(OtpError::DeliveryFailure { reason: e })
            }
        }
    }

    /// Verify candidates read from `input` against the stored code
    ///
    /// This method:
    /// 1. Fails immediately when no record exists
    /// 2. Reports expiry before reading any candidate
    /// 3. Serializes with other sessions for the same address
    /// 4. Reads candidates, racing each read against the expiry deadline
    ///
    /// Only the reads race the deadline. Once a candidate is in hand its
    /// comparison and store update run to completion, so a match is never
    /// reported as a timeout.
    ///
    /// Exactly one outcome is produced. The record is removed only on a
    /// match; on failure or timeout it stays in place.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult)` - A candidate matched and the record was consumed
    /// * `Err(OtpError::Expired)` - The deadline passed before a match
    /// * `Err(OtpError)` - No record, attempts exhausted, or record replaced
    pub async fn verify_code<I>(&self, email: &str, input: &mut I) -> OtpResult<VerifyCodeResult>
    where
        I: CodeInput + ?Sized,
    {
        let masked = mask_email(email);

        // Preconditions are checked before any suspension
        self.live_record(email, &masked).await?;

        let _session = self.sessions.acquire(email).await;

        // Another session may have consumed or replaced the record meanwhile
        let record = self.live_record(email, &masked).await?;
        let remaining = record
            .time_until_expiration(self.clock.now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        let deadline = Instant::now() + remaining;

        let outcome = self.attempt_loop(email, &masked, &record, deadline, input).await;

        match &outcome {
            Ok(result) => tracing::info!(
                email = %masked,
                event = "otp_verified_success",
                session_id = %result.session_id,
                failed_attempts = result.failed_attempts,
                "OTP successfully verified"
            ),
            Err(OtpError::Expired) => tracing::warn!(
                email = %masked,
                event = "otp_timeout",
                session_id = %record.session_id,
                "OTP verification deadline reached"
            ),
            Err(e) => tracing::warn!(
                email = %masked,
                event = "otp_verification_failed",
                session_id = %record.session_id,
                reason = %e,
                "OTP verification failed"
            ),
        }

        outcome
    }

    /// Check if a record exists for an address, live or dead
    pub async fn code_exists(&self, email: &str) -> OtpResult<bool> {
        Ok(self.store.get(email).await?.is_some())
    }

    /// Remaining verification attempts for the address's current record
    ///
    /// # Returns
    ///
    /// * `Ok(Some(n))` - A record exists with `n` attempts left
    /// * `Ok(None)` - No record exists
    pub async fn remaining_attempts(&self, email: &str) -> OtpResult<Option<u32>> {
        let record = self.store.get(email).await?;
        Ok(record.map(|r| r.remaining_attempts(self.config.max_attempts)))
    }

    /// Time left before the address's current record expires
    pub async fn time_until_expiration(&self, email: &str) -> OtpResult<Option<chrono::Duration>> {
        let record = self.store.get(email).await?;
        Ok(record.map(|r| r.time_until_expiration(self.clock.now())))
    }

    /// Fetch the record for a session, rejecting missing or expired ones
    async fn live_record(&self, email: &str, masked: &str) -> OtpResult<OtpRecord> {
        let record = match self.store.get(email).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    email = %masked,
                    event = "otp_not_found",
                    "Verification requested without an issued OTP"
                );
                return Err(OtpError::NoSuchSession);
            }
        };

        if record.is_expired_at(self.clock.now()) {
            tracing::warn!(
                email = %masked,
                event = "otp_expired",
                session_id = %record.session_id,
                "Verification requested for an expired OTP"
            );
            return Err(OtpError::Expired);
        }

        Ok(record)
    }

    /// Read, compare and retry until a match, the attempt cap, or expiry
    async fn attempt_loop<I>(
        &self,
        email: &str,
        masked: &str,
        record: &OtpRecord,
        deadline: Instant,
        input: &mut I,
    ) -> OtpResult<VerifyCodeResult>
    where
        I: CodeInput + ?Sized,
    {
        let max_attempts = self.config.max_attempts;
        let mut attempts = record.attempts;

        while attempts < max_attempts && !record.is_expired_at(self.clock.now()) {
            let read = tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline) => return Err(OtpError::Expired),
                read = input.read_code() => read,
            };

            let candidate = match read {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::warn!(
                        email = %masked,
                        error = %e,
                        event = "otp_input_error",
                        "Reading the candidate code failed, counting a wrong attempt"
                    );
                    None
                }
            };

            // A read that returns after the deadline never counts
            if record.is_expired_at(self.clock.now()) {
                return Err(OtpError::Expired);
            }

            if candidate.as_deref().is_some_and(|c| record.matches(c)) {
                return if self.store.consume(email, record.session_id).await? {
                    Ok(VerifyCodeResult {
                        session_id: record.session_id,
                        failed_attempts: attempts,
                    })
                } else {
                    Err(OtpError::Superseded)
                };
            }

            attempts = self
                .store
                .record_failed_attempt(email, record.session_id)
                .await?
                .ok_or(OtpError::Superseded)?;

            tracing::debug!(
                email = %masked,
                event = "otp_attempt_failed",
                attempts = attempts,
                remaining_attempts = max_attempts.saturating_sub(attempts),
                "Candidate code did not match"
            );
        }

        if attempts >= max_attempts {
            tracing::error!(
                email = %masked,
                event = "max_attempts_exceeded",
                attempts = attempts,
                "Maximum verification attempts exceeded for email address"
            );
            Err(OtpError::AttemptsExhausted { attempts })
        } else {
            Err(OtpError::WindowClosed)
        }
    }
}
