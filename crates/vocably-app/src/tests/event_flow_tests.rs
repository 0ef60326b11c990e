use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::RwLock;
use tokio::time::timeout;
use vocably_ai::{AiError, InsightProvider};
use vocably_config::Config;
use vocably_store::VocabularyStore;
use vocably_types::{AppEvent, EntryFields, StoreOp, WordInsight};

use crate::events::event_loop;
use crate::ui::ui_loop;

struct CannedProvider;

#[async_trait::async_trait]
impl InsightProvider for CannedProvider {
    async fn word_insight(&self, word: &str) -> Result<WordInsight, AiError> {
        Ok(WordInsight {
            meaning: format!("meaning of {word}"),
            word_type: "noun".to_string(),
            ..WordInsight::default()
        })
    }
}

fn spawn_event_loop(
    provider: Option<Arc<dyn InsightProvider>>,
) -> (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>) {
    let store = VocabularyStore::open_in_memory().unwrap();
    let (ui_to_app_tx, ui_to_app_rx) = kanal::bounded_async(64);
    let (app_to_ui_tx, app_to_ui_rx) = kanal::bounded_async(64);
    tokio::spawn(event_loop(store, provider, ui_to_app_rx, app_to_ui_tx));
    (ui_to_app_tx, app_to_ui_rx)
}

async fn recv(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timeout waiting for event")
        .expect("channel closed")
}

#[tokio::test]
async fn add_reports_outcome_then_refreshed_list() {
    let (tx, rx) = spawn_event_loop(None);

    tx.send(AppEvent::AddEntry(EntryFields::new("apple", "a fruit")))
        .await
        .unwrap();

    match recv(&rx).await {
        AppEvent::OperationFinished {
            op: StoreOp::Add,
            ok,
        } => assert!(ok),
        other => panic!("expected OperationFinished, got {other:?}"),
    }
    match recv(&rx).await {
        AppEvent::EntryList(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].word, "apple");
        }
        other => panic!("expected EntryList, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_add_fails_without_list_refresh() {
    let (tx, rx) = spawn_event_loop(None);

    tx.send(AppEvent::AddEntry(EntryFields::new("apple", "a fruit")))
        .await
        .unwrap();
    recv(&rx).await; // OperationFinished ok
    recv(&rx).await; // EntryList

    tx.send(AppEvent::AddEntry(EntryFields::new("apple", "again")))
        .await
        .unwrap();
    match recv(&rx).await {
        AppEvent::OperationFinished {
            op: StoreOp::Add,
            ok,
        } => assert!(!ok),
        other => panic!("expected failed OperationFinished, got {other:?}"),
    }

    // The next event must be the answer to an explicit refresh, not a
    // list pushed by the failed add.
    tx.send(AppEvent::RefreshList).await.unwrap();
    match recv(&rx).await {
        AppEvent::EntryList(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].definition, "a fruit");
        }
        other => panic!("expected EntryList, got {other:?}"),
    }
}

#[tokio::test]
async fn window_events_are_forwarded_to_ui() {
    let (tx, rx) = spawn_event_loop(None);

    tx.send(AppEvent::ShowWindow).await.unwrap();
    assert!(matches!(recv(&rx).await, AppEvent::ShowWindow));

    tx.send(AppEvent::HideWindow).await.unwrap();
    assert!(matches!(recv(&rx).await, AppEvent::HideWindow));
}

#[tokio::test]
async fn quit_stops_the_loop_and_notifies_ui() {
    let (tx, rx) = spawn_event_loop(None);

    tx.send(AppEvent::Quit).await.unwrap();
    assert!(matches!(recv(&rx).await, AppEvent::Quit));

    // Loop is gone; the ui->app channel has no receiver left.
    let closed = timeout(Duration::from_secs(2), async {
        loop {
            if tx.send(AppEvent::RefreshList).await.is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(closed.is_ok(), "loop still consuming after quit");
}

#[tokio::test]
async fn lookup_without_provider_yields_no_insight() {
    let (tx, rx) = spawn_event_loop(None);

    tx.send(AppEvent::LookupWord("apple".to_string()))
        .await
        .unwrap();
    match recv(&rx).await {
        AppEvent::LookupFinished { word, insight } => {
            assert_eq!(word, "apple");
            assert!(insight.is_none());
        }
        other => panic!("expected LookupFinished, got {other:?}"),
    }
}

#[tokio::test]
async fn lookup_with_provider_returns_insight_off_the_loop() {
    let (tx, rx) = spawn_event_loop(Some(Arc::new(CannedProvider)));

    tx.send(AppEvent::LookupWord("run".to_string())).await.unwrap();
    match recv(&rx).await {
        AppEvent::LookupFinished { word, insight } => {
            assert_eq!(word, "run");
            assert_eq!(insight.unwrap().meaning, "meaning of run");
        }
        other => panic!("expected LookupFinished, got {other:?}"),
    }
}

#[tokio::test]
async fn stats_and_review_batch_flow() {
    let (tx, rx) = spawn_event_loop(None);

    tx.send(AppEvent::AddEntry(EntryFields::new("apple", "a fruit")))
        .await
        .unwrap();
    recv(&rx).await;
    recv(&rx).await;

    tx.send(AppEvent::RequestStats).await.unwrap();
    match recv(&rx).await {
        AppEvent::StatsUpdated(stats) => {
            assert_eq!(stats.total_words, 1);
            assert_eq!(stats.unreviewed_words, 1);
        }
        other => panic!("expected StatsUpdated, got {other:?}"),
    }

    tx.send(AppEvent::RequestReviewBatch { limit: 5 }).await.unwrap();
    match recv(&rx).await {
        AppEvent::ReviewBatch(entries) => assert_eq!(entries.len(), 1),
        other => panic!("expected ReviewBatch, got {other:?}"),
    }
}

#[tokio::test]
async fn ui_bridge_auto_saves_finished_lookups() {
    let (app_to_ui_tx, app_to_ui_rx) = kanal::bounded_async(8);
    let (ui_to_app_tx, ui_to_app_rx) = kanal::bounded_async(8);
    let config = Arc::new(RwLock::new(Config::default()));
    assert!(config.read().await.vocabulary.auto_save);

    tokio::spawn(ui_loop(app_to_ui_rx, ui_to_app_tx, config));

    let insight = WordInsight {
        meaning: "a fruit".to_string(),
        ..WordInsight::default()
    };
    app_to_ui_tx
        .send(AppEvent::LookupFinished {
            word: "apple".to_string(),
            insight: Some(insight),
        })
        .await
        .unwrap();

    match recv(&ui_to_app_rx).await {
        AppEvent::AddEntry(fields) => {
            assert_eq!(fields.word, "apple");
            assert_eq!(fields.definition, "a fruit");
        }
        other => panic!("expected AddEntry, got {other:?}"),
    }
}
