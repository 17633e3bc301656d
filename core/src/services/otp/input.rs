//! Channel-backed candidate input

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::traits::CodeInput;

/// Candidate input fed through an mpsc channel
///
/// Lets a transport (web handler, chat bot) push codes as they arrive while a
/// verification session is waiting on them.
pub struct ChannelCodeInput {
    receiver: mpsc::Receiver<String>,
}

impl ChannelCodeInput {
    /// Wrap an existing receiver
    pub fn new(receiver: mpsc::Receiver<String>) -> Self {
        Self { receiver }
    }

    /// Create a bounded channel and return the sender with its input
    pub fn channel(buffer: usize) -> (mpsc::Sender<String>, Self) {
        let (sender, receiver) = mpsc::channel(buffer);
        (sender, Self::new(receiver))
    }
}

#[async_trait]
impl CodeInput for ChannelCodeInput {
    async fn read_code(&mut self) -> Result<String, String> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| "code input channel closed".to_string())
    }
}
