//! Outbound chat collaborator.
//!
//! The bot core only needs "deliver this text" and "deliver these bytes
//! under a filename"; connection and session management for a real chat
//! platform live behind this seam.

use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<(), GatewayError>;
    async fn send_file(&self, name: &str, bytes: &[u8]) -> Result<(), GatewayError>;
}

/// Console-backed channel: replies go to stdout, attachments to disk.
pub struct ConsoleGateway {
    attachment_dir: PathBuf,
}

impl ConsoleGateway {
    pub fn new(attachment_dir: PathBuf) -> ConsoleGateway {
        ConsoleGateway { attachment_dir }
    }
}

#[async_trait]
impl Notifier for ConsoleGateway {
    async fn send_text(&self, text: &str) -> Result<(), GatewayError> {
        println!("{text}");
        Ok(())
    }

    async fn send_file(&self, name: &str, bytes: &[u8]) -> Result<(), GatewayError> {
        tokio::fs::create_dir_all(&self.attachment_dir).await?;
        let path = self.attachment_dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        println!("[attachment saved to {}]", path.display());
        Ok(())
    }
}
