use tokio::sync::oneshot;

use crate::gateway::GatewayError;
use crate::persistence::PersistenceError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("persistence failure: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("channel delivery failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("bot is shutting down")]
    Shutdown,
}

/// Commands processed by the bot actor, strictly one at a time.
pub enum BotCommand {
    /// An incoming chat message.
    Message { user: i64, text: String },
    /// Periodic maintenance tick (weekly rollover check). Acked once the
    /// check has completed.
    Tick { ack: oneshot::Sender<()> },
    /// Ordered delivery of a finished prediction, sent by the replier
    /// loop. `png` is None when rendering failed or is disabled.
    DeliverPrediction {
        png: Option<Vec<u8>>,
        encoded: String,
        ack: oneshot::Sender<()>,
    },
}
