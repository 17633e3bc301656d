//! Terminal outcomes reported by the public OTP operations.

use serde::{Deserialize, Serialize};

/// Outcome of a passcode generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmailStatus {
    /// Code stored and delivered
    #[serde(rename = "STATUS_EMAIL_OK")]
    Ok,
    /// Code stored but delivery failed
    #[serde(rename = "STATUS_EMAIL_FAIL")]
    Fail,
    /// Address rejected, nothing stored
    #[serde(rename = "STATUS_EMAIL_INVALID")]
    Invalid,
}

impl EmailStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Ok => "STATUS_EMAIL_OK",
            EmailStatus::Fail => "STATUS_EMAIL_FAIL",
            EmailStatus::Invalid => "STATUS_EMAIL_INVALID",
        }
    }
}

impl std::fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a verification session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OtpStatus {
    /// Candidate matched; the record was consumed
    #[serde(rename = "STATUS_OTP_OK")]
    Ok,
    /// No record, attempts exhausted, or record replaced
    #[serde(rename = "STATUS_OTP_FAIL")]
    Fail,
    /// Deadline reached before a match
    #[serde(rename = "STATUS_OTP_TIMEOUT")]
    Timeout,
}

impl OtpStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpStatus::Ok => "STATUS_OTP_OK",
            OtpStatus::Fail => "STATUS_OTP_FAIL",
            OtpStatus::Timeout => "STATUS_OTP_TIMEOUT",
        }
    }
}

impl std::fmt::Display for OtpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde() {
        for status in [EmailStatus::Ok, EmailStatus::Fail, EmailStatus::Invalid] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
        for status in [OtpStatus::Ok, OtpStatus::Fail, OtpStatus::Timeout] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_parse_from_wire() {
        let status: OtpStatus = serde_json::from_str("\"STATUS_OTP_TIMEOUT\"").unwrap();
        assert_eq!(status, OtpStatus::Timeout);
    }
}
