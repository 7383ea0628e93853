//! The single-writer bot actor.
//!
//! One task owns the store, the clock, and the outbound channel, and
//! processes commands strictly sequentially. That sequencing is the
//! exclusive section: parse + decide + submit is atomic with respect to
//! other messages, the maintenance tick, and prediction deliveries.

use std::sync::Arc;

use stonks::{
    check_maintenance, evaluate, parse_report, resolve_submission, Clock, Decision,
    MaintenanceOutcome, PriceSeries, Submission,
};
use tokio::sync::mpsc;

use super::commands::{BotCommand, BotError};
use super::replier::PredictJob;
use crate::gateway::Notifier;
use crate::persistence::ReportStore;
use crate::render::ChartRenderer;

/// Attachment name for database snapshots.
const DB_ATTACHMENT: &str = "db.sqlite3";
/// Attachment name for rendered predictions.
const PREDICTION_ATTACHMENT: &str = "prediction.png";

/// Everything the actor owns.
pub struct BotState {
    pub store: ReportStore,
    pub clock: Box<dyn Clock>,
    pub notifier: Arc<dyn Notifier>,
    pub renderer: Arc<dyn ChartRenderer>,
    pub predict_url: String,
    pub predict_tx: mpsc::UnboundedSender<PredictJob>,
}

pub(crate) async fn run_bot_actor(mut state: BotState, mut cmd_rx: mpsc::Receiver<BotCommand>) {
    tracing::info!("Bot actor started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BotCommand::Message { user, text } => {
                if let Err(e) = handle_message(&mut state, user, &text).await {
                    tracing::error!(user, "Message handling failed: {e}");
                }
            }
            BotCommand::Tick { ack } => {
                if let Err(e) = run_maintenance(&mut state).await {
                    tracing::error!("Maintenance failed: {e}");
                }
                let _ = ack.send(());
            }
            BotCommand::DeliverPrediction { png, encoded, ack } => {
                deliver_prediction(&state, png, &encoded).await;
                let _ = ack.send(());
            }
        }
    }

    tracing::info!("Bot actor exited");
}

async fn handle_message(state: &mut BotState, user: i64, text: &str) -> Result<(), BotError> {
    if text.trim() == "dump" {
        let bytes = state.store.dump().await?;
        state.notifier.send_file(DB_ATTACHMENT, &bytes).await?;
        return Ok(());
    }

    let parsed = parse_report(text);
    let decision = evaluate(
        &parsed,
        state.clock.current_day(),
        state.clock.current_day_part(),
    );
    let Decision::Accept { report, replace } = decision else {
        // Gate failures are silent by design.
        tracing::debug!(user, text, "Message rejected by acceptance gates");
        return Ok(());
    };

    let old = state.store.submit(user, &report, replace).await?;
    let confirmation = match resolve_submission(old, report.price, replace) {
        Submission::Recorded { price } => {
            format!("Recorded {} bells at {} {}", price, report.day, report.day_part)
        }
        Submission::Updated {
            old_price,
            new_price,
        } => format!(
            "{} {} updated from {} to {}",
            report.day, report.day_part, old_price, new_price
        ),
        // Implicit report colliding with an existing slot: drop silently.
        Submission::Rejected => return Ok(()),
    };
    tracing::info!(user, day = %report.day, day_part = %report.day_part, price = report.price, "Report accepted");
    state.notifier.send_text(&confirmation).await?;

    // Render in the background; the replier loop keeps replies in order.
    let reports = state.store.user_reports(user).await?;
    let encoded = PriceSeries::from_reports(&reports).encode();
    let renderer = Arc::clone(&state.renderer);
    let prices = encoded.clone();
    let task = tokio::spawn(async move { renderer.render(&prices).await });
    if state.predict_tx.send(PredictJob { task, encoded }).is_err() {
        tracing::warn!("Predict replier gone, dropping render job");
    }
    Ok(())
}

async fn run_maintenance(state: &mut BotState) -> Result<(), BotError> {
    let now_ts = state.clock.now_ts();
    let last_ts = state.store.last_maintenance().await?;

    match check_maintenance(last_ts, now_ts) {
        MaintenanceOutcome::Bootstrapped => {
            tracing::info!("First maintenance check, recording timestamp");
        }
        MaintenanceOutcome::Rollover => rollover(state).await?,
        MaintenanceOutcome::Noop => {}
    }

    state.store.set_last_maintenance(now_ts).await?;
    Ok(())
}

/// Close, archive, truncate, reopen. The old week's data survives only as
/// the snapshot attachment.
async fn rollover(state: &mut BotState) -> Result<(), BotError> {
    tracing::info!("Week boundary crossed, rolling over");
    state.store.close().await;
    state
        .notifier
        .send_text("Rolling over database for new week")
        .await?;
    let bytes = state.store.dump().await?;
    state.notifier.send_file(DB_ATTACHMENT, &bytes).await?;
    state.store.truncate().await?;
    state.store.reopen().await?;
    tracing::info!("Weekly rollover complete");
    Ok(())
}

async fn deliver_prediction(state: &BotState, png: Option<Vec<u8>>, encoded: &str) {
    if let Some(png) = png {
        if let Err(e) = state.notifier.send_file(PREDICTION_ATTACHMENT, &png).await {
            tracing::error!("Failed to deliver prediction image: {e}");
        }
    }
    let link = format!("{}?prices={}", state.predict_url, encoded);
    if let Err(e) = state.notifier.send_text(&link).await {
        tracing::error!("Failed to deliver prediction link: {e}");
    }
}
