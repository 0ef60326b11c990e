use kanal::AsyncSender;
use vocably_store::VocabularyStore;
use vocably_types::{AppEvent, EntryFields, StoreOp};

pub async fn handle_add(
    store: &mut VocabularyStore,
    fields: EntryFields,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let ok = store.add(&fields);
    finish(store, StoreOp::Add, ok, app_to_ui_tx).await
}

pub async fn handle_update(
    store: &mut VocabularyStore,
    id: i64,
    fields: &EntryFields,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let ok = store.update(id, fields);
    finish(store, StoreOp::Update, ok, app_to_ui_tx).await
}

pub async fn handle_delete(
    store: &mut VocabularyStore,
    id: i64,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let ok = store.delete(id);
    finish(store, StoreOp::Delete, ok, app_to_ui_tx).await
}

pub async fn handle_mark_reviewed(
    store: &mut VocabularyStore,
    id: i64,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let ok = store.mark_reviewed(id);
    finish(store, StoreOp::MarkReviewed, ok, app_to_ui_tx).await
}

/// Report the outcome, then push a fresh list so the UI never shows
/// stale rows after a mutation.
async fn finish(
    store: &mut VocabularyStore,
    op: StoreOp,
    ok: bool,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::OperationFinished { op, ok })
        .await?;
    if ok {
        app_to_ui_tx
            .send(AppEvent::EntryList(store.list_all()))
            .await?;
    }
    Ok(())
}
