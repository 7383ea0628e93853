use tokio::sync::{mpsc, oneshot};

use super::commands::{BotCommand, BotError};

/// Cheap, cloneable handle to the bot actor.
#[derive(Clone)]
pub struct BotHandle {
    cmd_tx: mpsc::Sender<BotCommand>,
}

impl BotHandle {
    pub(crate) fn new(cmd_tx: mpsc::Sender<BotCommand>) -> BotHandle {
        BotHandle { cmd_tx }
    }

    pub async fn message(&self, user: i64, text: String) -> Result<(), BotError> {
        self.send(BotCommand::Message { user, text }).await
    }

    /// Run a maintenance check and wait until the actor has finished it.
    pub async fn tick(&self) -> Result<(), BotError> {
        let (ack, acked) = oneshot::channel();
        self.send(BotCommand::Tick { ack }).await?;
        acked.await.map_err(|_| BotError::Shutdown)
    }

    /// Deliver a finished prediction and wait until the actor has sent
    /// the reply. The replier loop relies on this to keep replies in
    /// request order.
    pub(crate) async fn deliver_prediction(
        &self,
        png: Option<Vec<u8>>,
        encoded: String,
    ) -> Result<(), BotError> {
        let (ack, acked) = oneshot::channel();
        self.send(BotCommand::DeliverPrediction { png, encoded, ack })
            .await?;
        acked.await.map_err(|_| BotError::Shutdown)
    }

    async fn send(&self, cmd: BotCommand) -> Result<(), BotError> {
        self.cmd_tx.send(cmd).await.map_err(|_| BotError::Shutdown)
    }
}
