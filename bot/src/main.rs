mod bot;
mod config;
mod gateway;
mod persistence;
mod render;

use std::sync::Arc;

use stonks::LocalClock;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};

use config::Config;
use gateway::{ConsoleGateway, Notifier};
use persistence::ReportStore;
use render::{ChartRenderer, CommandRenderer, NullRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting stonks bot");

    let config = Config::from_env();
    tracing::info!("Using database: {}", config.db_path.display());

    let store = ReportStore::open(&config.db_path).await?;

    let attachment_dir = config
        .db_path
        .parent()
        .map(|p| p.join("attachments"))
        .unwrap_or_else(|| "attachments".into());
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleGateway::new(attachment_dir));

    let renderer: Arc<dyn ChartRenderer> = match &config.render_cmd {
        Some(cmd) => Arc::new(CommandRenderer::new(cmd.clone(), config.predict_url.clone())),
        None => {
            tracing::info!("No renderer configured, replying with links only");
            Arc::new(NullRenderer)
        }
    };

    let handle = bot::spawn_bot(
        store,
        Box::new(LocalClock),
        notifier,
        renderer,
        config.predict_url.clone(),
    );

    // Maintenance ticker. The first tick fires immediately, which runs
    // the bootstrap check on startup.
    let ticker = handle.clone();
    tokio::spawn(async move {
        let mut interval = time::interval(config.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if ticker.tick().await.is_err() {
                break;
            }
        }
    });

    // Feed messages from stdin: one per line, "<user-id> <text>".
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input_line(&line) {
            Some((user, text)) => handle.message(user, text).await?,
            None => tracing::warn!(%line, "Ignoring malformed input line"),
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

fn parse_input_line(line: &str) -> Option<(i64, String)> {
    let (user, text) = line.trim().split_once(' ')?;
    let user = user.parse().ok()?;
    Some((user, text.to_string()))
}
