pub mod actor;
pub mod commands;
pub mod handle;
pub mod replier;


use std::sync::Arc;

use stonks::Clock;
use tokio::sync::mpsc;

use crate::gateway::Notifier;
use crate::persistence::ReportStore;
use crate::render::ChartRenderer;

use actor::{run_bot_actor, BotState};
pub use handle::BotHandle;
use replier::run_predict_replier;

/// Spawn the bot actor and its predict replier. Dropping every clone of
/// the returned handle shuts both down.
pub fn spawn_bot(
    store: ReportStore,
    clock: Box<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    renderer: Arc<dyn ChartRenderer>,
    predict_url: String,
) -> BotHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(32);
    let (predict_tx, predict_rx) = mpsc::unbounded_channel();

    let handle = BotHandle::new(cmd_tx);

    let state = BotState {
        store,
        clock,
        notifier,
        renderer,
        predict_url,
        predict_tx,
    };
    tokio::spawn(run_bot_actor(state, cmd_rx));
    tokio::spawn(run_predict_replier(predict_rx, handle.clone()));

    handle
}
