//! Ordered prediction replies.
//!
//! Renders run as background tasks, but each reply references the
//! confirmation message that preceded it, so replies must go out in the
//! order the requests arrived. This loop drains the job queue strictly
//! FIFO: await the render, hand the result to the actor, wait for the
//! actor's ack, then take the next job. A stuck render blocks everything
//! behind it; there are no timeouts and no cancellation.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::handle::BotHandle;
use crate::render::RenderError;

pub struct PredictJob {
    pub task: JoinHandle<Result<Vec<u8>, RenderError>>,
    pub encoded: String,
}

pub(crate) async fn run_predict_replier(
    mut job_rx: mpsc::UnboundedReceiver<PredictJob>,
    handle: BotHandle,
) {
    tracing::info!("Predict replier started");

    while let Some(job) = job_rx.recv().await {
        let png = match job.task.await {
            Ok(Ok(png)) => Some(png),
            Ok(Err(RenderError::Disabled)) => None,
            Ok(Err(e)) => {
                tracing::error!("Prediction render failed: {e}");
                None
            }
            Err(e) => {
                tracing::error!("Prediction render task panicked: {e}");
                None
            }
        };

        if handle.deliver_prediction(png, job.encoded).await.is_err() {
            tracing::info!("Bot actor gone, replier exiting");
            break;
        }
    }

    tracing::info!("Predict replier exited");
}
