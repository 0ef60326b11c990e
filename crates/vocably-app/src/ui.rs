use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::RwLock;
use vocably_config::Config;
use vocably_types::AppEvent;

/// Headless stand-in for the GTK shell. This loop is the seam the real
/// window/tray code plugs into: it is the single consumer of app→ui
/// events, so everything arriving here is already marshaled off the
/// IPC, signal and worker tasks.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let mut window_visible = true;

    loop {
        let event = app_to_ui_rx.recv().await?;
        match event {
            AppEvent::ShowWindow => {
                window_visible = true;
                tracing::info!("presenting window");
            }
            AppEvent::HideWindow => {
                if window_visible {
                    tracing::info!("hiding window to tray");
                }
                window_visible = false;
            }
            AppEvent::Quit => {
                tracing::info!("ui bridge shutting down");
                return Ok(());
            }
            AppEvent::EntryList(entries) => {
                tracing::debug!("list updated: {} entries", entries.len());
            }
            AppEvent::StatsUpdated(stats) => {
                tracing::debug!(
                    "stats: {} total, {} reviewed, {} today",
                    stats.total_words,
                    stats.reviewed_words,
                    stats.today_words
                );
            }
            AppEvent::ReviewBatch(entries) => {
                tracing::debug!("review batch of {} entries", entries.len());
            }
            AppEvent::LookupFinished { word, insight } => match insight {
                Some(insight) => {
                    tracing::info!("lookup finished for `{word}`");
                    let auto_save = config.read().await.vocabulary.auto_save;
                    if auto_save {
                        ui_to_app_tx
                            .send(AppEvent::AddEntry(insight.into_fields(&word)))
                            .await?;
                    }
                }
                None => {
                    tracing::info!("no insight available for `{word}`");
                }
            },
            AppEvent::OperationFinished { op, ok } => {
                tracing::debug!("operation {op:?} finished, ok={ok}");
            }
            other => {
                tracing::debug!("ignoring app-bound event on the ui channel: {other:?}");
            }
        }
    }
}
