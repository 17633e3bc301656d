//! Passcode generation and message composition

use rand::{rngs::OsRng, Rng};

use crate::domain::entities::CODE_LENGTH;

/// Exclusive upper bound of the sampled code value (10^CODE_LENGTH)
const CODE_SPACE: u32 = 1_000_000;

/// Generate a cryptographically secure random passcode
///
/// Samples uniformly over the full range 000000..=999999 from the OS CSPRNG
/// and zero-pads, so leading zeros do occur.
pub fn generate_secure_code() -> String {
    let code = OsRng.gen_range(0..CODE_SPACE);
    format!("{:0width$}", code, width = CODE_LENGTH)
}

/// Human-readable form of the validity window, e.g. "1 minute"
pub fn describe_validity(seconds: u64) -> String {
    if seconds >= 60 && seconds % 60 == 0 {
        let minutes = seconds / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{} minutes", minutes)
        }
    } else if seconds == 1 {
        "1 second".to_string()
    } else {
        format!("{} seconds", seconds)
    }
}

/// Compose the mail body carrying the code
pub fn compose_message(code: &str, validity_seconds: u64) -> String {
    format!(
        "Your OTP Code is {}. The code is valid for {}.",
        code,
        describe_validity(validity_seconds)
    )
}
