use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use vocably_ai::InsightProvider;
use vocably_store::VocabularyStore;
use vocably_types::AppEvent;

pub mod entries;
pub mod lookup;
pub mod queries;

use entries::{handle_add, handle_delete, handle_mark_reviewed, handle_update};
use lookup::spawn_lookup;
use queries::{handle_refresh, handle_review_batch, handle_search, handle_stats};

/// App's main loop. Exits cleanly on `Quit`.
pub async fn event_loop(
    mut store: VocabularyStore,
    provider: Option<Arc<dyn InsightProvider>>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("event loop started");
    loop {
        let event = ui_to_app_rx.recv().await?;

        if matches!(event, AppEvent::Quit) {
            tracing::info!("quit requested");
            // Let the UI bridge tear down too.
            let _ = app_to_ui_tx.send(AppEvent::Quit).await;
            return Ok(());
        }

        handle_events(&mut store, provider.clone(), &app_to_ui_tx, event).await?;
    }
}

async fn handle_events(
    store: &mut VocabularyStore,
    provider: Option<Arc<dyn InsightProvider>>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        // Window control goes straight to the UI bridge; the bridge is
        // the only place that touches shell state.
        AppEvent::ShowWindow | AppEvent::HideWindow => {
            app_to_ui_tx.send(event).await?;
        }
        AppEvent::Quit => {
            // Handled in the loop itself.
        }

        AppEvent::AddEntry(fields) => {
            handle_add(store, fields, app_to_ui_tx).await?;
        }
        AppEvent::UpdateEntry { id, fields } => {
            handle_update(store, id, &fields, app_to_ui_tx).await?;
        }
        AppEvent::DeleteEntry { id } => {
            handle_delete(store, id, app_to_ui_tx).await?;
        }
        AppEvent::MarkReviewed { id } => {
            handle_mark_reviewed(store, id, app_to_ui_tx).await?;
        }
        AppEvent::RefreshList => {
            handle_refresh(store, app_to_ui_tx).await?;
        }
        AppEvent::Search(term) => {
            handle_search(store, &term, app_to_ui_tx).await?;
        }
        AppEvent::RequestStats => {
            handle_stats(store, app_to_ui_tx).await?;
        }
        AppEvent::RequestReviewBatch { limit } => {
            handle_review_batch(store, limit, app_to_ui_tx).await?;
        }
        AppEvent::LookupWord(word) => {
            spawn_lookup(provider, word, app_to_ui_tx.clone());
        }

        // App -> UI events arriving here would be a wiring bug; drop
        // them rather than loop forever.
        AppEvent::EntryList(_)
        | AppEvent::StatsUpdated(_)
        | AppEvent::ReviewBatch(_)
        | AppEvent::LookupFinished { .. }
        | AppEvent::OperationFinished { .. } => {
            tracing::debug!("ignoring ui-bound event on the app channel");
        }
    }

    Ok(())
}
