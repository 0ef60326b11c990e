use kanal::AsyncSender;
use vocably_store::VocabularyStore;
use vocably_types::AppEvent;

pub async fn handle_refresh(
    store: &mut VocabularyStore,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::EntryList(store.list_all()))
        .await?;
    Ok(())
}

pub async fn handle_search(
    store: &mut VocabularyStore,
    term: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::EntryList(store.search(term)))
        .await?;
    Ok(())
}

pub async fn handle_stats(
    store: &mut VocabularyStore,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::StatsUpdated(store.stats()))
        .await?;
    Ok(())
}

pub async fn handle_review_batch(
    store: &mut VocabularyStore,
    limit: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::ReviewBatch(store.random_sample(limit)))
        .await?;
    Ok(())
}
