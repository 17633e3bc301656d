//! End-to-end passcode flows through the infrastructure wiring

use std::sync::Arc;
use std::time::Duration;

use eo_core::domain::value_objects::{EmailStatus, OtpStatus};
use eo_infra::input::{ChannelCodeInput, LineCodeInput};
use eo_infra::mail::MockMailService;
use eo_infra::InfrastructureServices;
use eo_shared::AppConfig;

const EMAIL: &str = "user@dso.org.sg";

fn services_with(mock: &MockMailService) -> InfrastructureServices {
    InfrastructureServices::with_mail_service(AppConfig::default(), Arc::new(mock.clone()))
}

/// Pull the six-digit code out of the delivered mail body
fn delivered_code(mock: &MockMailService, email: &str) -> String {
    let body = mock.last_message(email).expect("a mail should have been delivered");
    body.split_whitespace()
        .map(|word| word.trim_end_matches('.'))
        .find(|word| word.len() == 6 && word.chars().all(|c| c.is_ascii_digit()))
        .expect("mail body should contain the code")
        .to_string()
}

#[tokio::test]
async fn test_issue_then_verify_after_one_wrong_guess() {
    let mock = MockMailService::with_options(false, false);
    let services = services_with(&mock);
    let otp = &services.otp_service;

    assert_eq!(otp.generate_otp_email(EMAIL).await, EmailStatus::Ok);
    let code = delivered_code(&mock, EMAIL);
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let typed = format!("{}\n{}\n", wrong, code);
    let mut input = LineCodeInput::new(typed.as_bytes());
    assert_eq!(otp.check_otp(EMAIL, &mut input).await, OtpStatus::Ok);

    let retyped = format!("{}\n", code);
    let mut input = LineCodeInput::new(retyped.as_bytes());
    assert_eq!(otp.check_otp(EMAIL, &mut input).await, OtpStatus::Fail);
}

#[tokio::test]
async fn test_mail_body_names_validity() {
    let mock = MockMailService::with_options(false, false);
    let services = services_with(&mock);

    services.otp_service.generate_otp_email(EMAIL).await;
    let body = mock.last_message(EMAIL).unwrap();
    assert!(body.starts_with("Your OTP Code is "));
    assert!(body.ends_with("The code is valid for 1 minute."));
}

#[tokio::test]
async fn test_foreign_domain_is_rejected_without_mail() {
    let mock = MockMailService::with_options(false, false);
    let services = services_with(&mock);

    assert_eq!(
        services.otp_service.generate_otp_email("user@example.com").await,
        EmailStatus::Invalid
    );
    assert_eq!(mock.get_message_count(), 0);
}

#[tokio::test]
async fn test_rejected_mail_reports_fail() {
    let mut mock = MockMailService::with_options(false, false);
    mock.set_simulate_rejection(true);
    let services = services_with(&mock);

    assert_eq!(services.otp_service.generate_otp_email(EMAIL).await, EmailStatus::Fail);
    assert!(services.otp_service.code_exists(EMAIL).await.unwrap());
}

#[tokio::test]
async fn test_provider_fault_reports_fail() {
    let mock = MockMailService::with_options(false, true);
    let services = services_with(&mock);

    assert_eq!(services.otp_service.generate_otp_email(EMAIL).await, EmailStatus::Fail);
}

#[tokio::test]
async fn test_end_of_input_exhausts_attempts() {
    let mock = MockMailService::with_options(false, false);
    let services = services_with(&mock);
    services.otp_service.generate_otp_email(EMAIL).await;

    let mut input = LineCodeInput::new(&b""[..]);
    assert_eq!(services.otp_service.check_otp(EMAIL, &mut input).await, OtpStatus::Fail);
    assert_eq!(services.otp_service.remaining_attempts(EMAIL).await.unwrap(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_silent_terminal_times_out() {
    let mock = MockMailService::with_options(false, false);
    let services = services_with(&mock);
    services.otp_service.generate_otp_email(EMAIL).await;

    // The writer half stays open, so reads never complete
    let (_writer, reader) = tokio::io::duplex(64);
    let mut input = LineCodeInput::new(tokio::io::BufReader::new(reader));
    assert_eq!(services.otp_service.check_otp(EMAIL, &mut input).await, OtpStatus::Timeout);
}

#[tokio::test]
async fn test_channel_fed_verification() {
    let mock = MockMailService::with_options(false, false);
    let services = services_with(&mock);
    services.otp_service.generate_otp_email(EMAIL).await;
    let code = delivered_code(&mock, EMAIL);

    let (sender, mut input) = ChannelCodeInput::channel(8);
    let otp = services.otp_service.clone();
    let session = tokio::spawn(async move { otp.check_otp(EMAIL, &mut input).await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    sender.send("nope".to_string()).await.unwrap();
    sender.send(code).await.unwrap();

    assert_eq!(session.await.unwrap(), OtpStatus::Ok);
}

#[tokio::test]
async fn test_close_clears_issued_codes() {
    let mock = MockMailService::with_options(false, false);
    let services = services_with(&mock);
    services.otp_service.start();
    services.otp_service.generate_otp_email(EMAIL).await;

    services.otp_service.close().await;
    assert!(!services.otp_service.code_exists(EMAIL).await.unwrap());
}
