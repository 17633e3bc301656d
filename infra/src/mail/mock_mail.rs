//! Mock Mail Service Implementation
//!
//! Logs messages to the console instead of sending them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use eo_shared::email::{is_valid_email, mask_email};

use super::mail_service::MailService;
use crate::InfrastructureError;

/// Mock mail service for development and testing
///
/// This implementation:
/// - Prints messages to the console
/// - Keeps the last body sent to each recipient
/// - Generates mock message IDs
/// - Can simulate provider faults and rejections
#[derive(Clone)]
pub struct MockMailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last body sent per recipient
    outbox: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate transport failures
    simulate_failure: bool,
    /// Whether to simulate the provider refusing messages
    simulate_rejection: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure,
            simulate_rejection: false,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last body delivered to `to`
    pub fn last_message(&self, to: &str) -> Option<String> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(to)
            .cloned()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    /// Enable or disable rejection simulation
    pub fn set_simulate_rejection(&mut self, simulate: bool) {
        self.simulate_rejection = simulate;
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let masked = mask_email(to);

        if !is_valid_email(to) {
            return Err(InfrastructureError::MailRejected(format!("Invalid recipient: {}", masked)));
        }

        if self.simulate_failure {
            warn!(email = %masked, "Mock mail service simulating failure");
            return Err(InfrastructureError::Mail("Simulated mail sending failure".to_string()));
        }

        if self.simulate_rejection {
            warn!(email = %masked, "Mock mail service simulating rejection");
            return Err(InfrastructureError::MailRejected("Simulated mailbox rejection".to_string()));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(to.to_string(), body.to_string());

        if self.console_output {
            // Console output for development - show full message
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", to);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("Content: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_service",
            provider = "mock",
            email = %masked,
            message_id = %message_id,
            message_length = body.len(),
            "Mail sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}
