//! SMTP Mail Service Implementation
//!
//! Delivers passcode mails through an SMTP relay using lettre's async
//! transport on the tokio executor. Port 465 uses implicit TLS, any other
//! port upgrades with STARTTLS. Credentials are sent only when configured.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info, warn};

use eo_shared::email::mask_email;
use eo_shared::MailConfig;

use super::mail_service::MailService;
use crate::InfrastructureError;

/// SMTPS port
const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP mail service
pub struct SmtpMailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl SmtpMailService {
    /// Create a new SMTP mail service
    ///
    /// Fails when the relay host or sender address cannot be used.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;

        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        };
        let mut builder = builder
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay {}: {}", config.smtp_host, e)))?
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        Ok(Self {
            mailer: builder.build(),
            from,
            host: config.smtp_host.clone(),
        })
    }
}

#[async_trait]
impl MailService for SmtpMailService {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let masked = mask_email(to);

        let recipient: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::MailRejected(format!("Invalid recipient {}: {}", masked, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))?;

        match self.mailer.send(message).await {
            Ok(response) if response.is_positive() => {
                let reply = response.message().collect::<Vec<_>>().join(" ");
                info!(
                    target: "mail_service",
                    provider = "smtp",
                    relay = %self.host,
                    email = %masked,
                    code = %response.code(),
                    "Mail sent successfully"
                );
                Ok(reply)
            }
            Ok(response) => {
                warn!(
                    provider = "smtp",
                    email = %masked,
                    code = %response.code(),
                    "SMTP relay did not accept the message"
                );
                Err(InfrastructureError::MailRejected(format!(
                    "SMTP relay answered {}",
                    response.code()
                )))
            }
            Err(e) if e.is_permanent() => {
                warn!(provider = "smtp", email = %masked, error = %e, "SMTP relay rejected the message");
                Err(InfrastructureError::MailRejected(e.to_string()))
            }
            Err(e) => {
                error!(provider = "smtp", email = %masked, error = %e, "SMTP transport failed");
                Err(InfrastructureError::Mail(e.to_string()))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }

    async fn is_available(&self) -> bool {
        self.mailer.test_connection().await.unwrap_or(false)
    }
}
