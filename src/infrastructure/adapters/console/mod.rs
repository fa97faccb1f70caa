//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::{mpsc, Mutex};
use crate::domain::entities::Reply;
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    sender: Option<mpsc::Sender<String>>,
    stdin: Mutex<BufReader<Stdin>>,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: name.into(),
                username: "console".to_string(),
            },
            sender: None,
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    /// Forward rendered replies to a channel instead of stdout
    pub fn with_sender(mut self, sender: mpsc::Sender<String>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Read one line. Returns `None` at end of input.
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await.ok()?;
        stdout.flush().await.ok()?;

        let mut input = String::new();
        let read = self.stdin.lock().await.read_line(&mut input).await.ok()?;
        if read == 0 {
            return None;
        }
        Some(input.trim().to_string())
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_reply(&self, channel_id: &str, reply: &Reply) -> Result<(), BotError> {
        let text = reply.render();
        match &self.sender {
            Some(sender) => sender
                .send(text)
                .await
                .map_err(|e| BotError::Internal(format!("Reply channel closed: {}", e))),
            None => {
                println!("[{}] {}", channel_id, text);
                Ok(())
            }
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_reply_to_channel() {
        let (tx, mut rx) = mpsc::channel(4);
        let bot = ConsoleAdapter::new("ruff-cogs").with_sender(tx);

        bot.send_reply("console", &Reply::Spoiler("https://example.com/a.gif".into()))
            .await
            .unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some("||https://example.com/a.gif||"));
        assert_eq!(bot.bot_info().name, "ruff-cogs");
    }
}
