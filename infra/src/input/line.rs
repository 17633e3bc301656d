//! Line-oriented candidate input
//!
//! Reads one candidate per line from any async buffered reader: a terminal,
//! a socket, or an in-memory buffer in tests.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use eo_core::services::CodeInput;

use crate::InfrastructureError;

/// Candidate input reading newline-terminated codes
///
/// End of input is reported on every read after the last line. Each report
/// counts as a wrong attempt, so a closed reader exhausts the session's
/// remaining attempts at once and verification ends in `STATUS_OTP_FAIL`.
pub struct LineCodeInput<R> {
    reader: R,
    line: String,
}

impl<R: AsyncBufRead + Unpin + Send> LineCodeInput<R> {
    /// Read candidates from `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl LineCodeInput<BufReader<Stdin>> {
    /// Read candidates from standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> CodeInput for LineCodeInput<R> {
    /// Surrounding whitespace and the line terminator are stripped; end of
    /// input is reported as an error.
    async fn read_code(&mut self) -> Result<String, String> {
        self.line.clear();
        match self.reader.read_line(&mut self.line).await {
            Ok(0) => Err("end of input".to_string()),
            Ok(_) => Ok(self.line.trim().to_string()),
            Err(e) => Err(InfrastructureError::from(e).to_string()),
        }
    }
}
