//! Unit tests for mail provider selection

use eo_shared::MailConfig;

use crate::mail::create_mail_service;

#[tokio::test]
async fn test_create_mock_service() {
    let config = MailConfig::default();
    let service = create_mail_service(&config).await;
    assert_eq!(service.provider_name(), "Mock");
}

#[tokio::test]
async fn test_unknown_provider_falls_back_to_mock() {
    let config = MailConfig {
        provider: "carrier-pigeon".to_string(),
        ..MailConfig::default()
    };
    let service = create_mail_service(&config).await;
    assert_eq!(service.provider_name(), "Mock");
}

#[cfg(feature = "smtp")]
#[tokio::test]
async fn test_create_smtp_service() {
    let config = MailConfig::smtp("smtp.example.com", 587).with_credentials("user", "secret");
    let service = create_mail_service(&config).await;
    assert_eq!(service.provider_name(), "SMTP");
}

#[cfg(feature = "smtp")]
#[tokio::test]
async fn test_smtp_with_bad_sender_falls_back_to_mock() {
    let config = MailConfig {
        from_address: "not an address".to_string(),
        ..MailConfig::smtp("smtp.example.com", 587)
    };
    let service = create_mail_service(&config).await;
    assert_eq!(service.provider_name(), "Mock");
}
