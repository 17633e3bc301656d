//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    AddressValidator, ChannelCodeInput, Clock, CodeInput, EmailOtpService,
    EmailOtpServiceConfig, MailServiceTrait, SendCodeResult, SyntaxAddressValidator,
    SystemClock, VerifyCodeResult,
};
