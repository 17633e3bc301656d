//! Interactive console front-end
//!
//! Issues a passcode for the address given on the command line, then reads
//! candidates from standard input until the code verifies, the attempts run
//! out, or the code expires.
//!
//! ```text
//! eo-console user@dso.org.sg
//! ```

use anyhow::Context;

use eo_core::domain::value_objects::EmailStatus;
use eo_infra::input::LineCodeInput;
use eo_infra::{settings, telemetry, InfrastructureServices};

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run());
    // A stdin read left pending by a timed-out session cannot be cancelled
    runtime.shutdown_background();
    result
}

async fn run() -> anyhow::Result<()> {
    let email = std::env::args()
        .nth(1)
        .context("usage: eo-console <email-address>")?;

    let config = settings::load_config().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging)?;

    let services = InfrastructureServices::from_config(config).await;
    services.check_mail_provider().await;
    let otp = services.otp_service;
    otp.start();

    let issued = otp.generate_otp_email(&email).await;
    println!("{}", issued);

    if issued == EmailStatus::Ok {
        println!(
            "Enter the code sent to {} (valid for {} seconds):",
            email,
            otp.config().code_validity_seconds
        );
        let mut input = LineCodeInput::stdin();
        println!("{}", otp.check_otp(&email, &mut input).await);
    }

    otp.close().await;
    Ok(())
}
