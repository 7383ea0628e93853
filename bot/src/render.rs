//! Chart-rendering collaborator.
//!
//! The only protocol detail the bot knows is the dot-joined 13-slot price
//! string; turning that into a chart image is an external program's job.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to spawn renderer: {0}")]
    Spawn(std::io::Error),
    #[error("renderer exited with {0}")]
    Failed(std::process::ExitStatus),
    #[error("no renderer configured")]
    Disabled,
}

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render the encoded price series into image bytes.
    async fn render(&self, prices: &str) -> Result<Vec<u8>, RenderError>;
}

/// Runs an external renderer program with the prediction URL as its only
/// argument and takes the image from its stdout.
pub struct CommandRenderer {
    program: String,
    base_url: String,
}

impl CommandRenderer {
    pub fn new(program: String, base_url: String) -> CommandRenderer {
        CommandRenderer { program, base_url }
    }
}

#[async_trait]
impl ChartRenderer for CommandRenderer {
    async fn render(&self, prices: &str) -> Result<Vec<u8>, RenderError> {
        let url = format!("{}?prices={}", self.base_url, prices);
        tracing::debug!(program = %self.program, %url, "Spawning chart renderer");

        let output = Command::new(&self.program)
            .arg(&url)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(RenderError::Spawn)?;

        if !output.status.success() {
            return Err(RenderError::Failed(output.status));
        }
        Ok(output.stdout)
    }
}

/// Used when no renderer is configured; replies carry the link only.
pub struct NullRenderer;

#[async_trait]
impl ChartRenderer for NullRenderer {
    async fn render(&self, _prices: &str) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn command_renderer_captures_stdout() {
        let renderer = CommandRenderer::new("echo".to_string(), "http://example.test/".to_string());
        let out = renderer.render("1.0.0.0.0.0.0.0.0.0.0.0.0").await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap().trim(),
            "http://example.test/?prices=1.0.0.0.0.0.0.0.0.0.0.0.0"
        );
    }

    #[tokio::test]
    async fn failing_command_is_an_error() {
        let renderer = CommandRenderer::new("false".to_string(), "http://example.test/".to_string());
        assert!(matches!(
            renderer.render("0").await,
            Err(RenderError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn null_renderer_is_disabled() {
        assert!(matches!(
            NullRenderer.render("0").await,
            Err(RenderError::Disabled)
        ));
    }
}
