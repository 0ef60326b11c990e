use std::sync::Arc;

use kanal::AsyncSender;
use vocably_ai::InsightProvider;
use vocably_types::AppEvent;

/// Run the AI call off the event loop and marshal the result back as an
/// event. Any provider failure collapses to "no insight"; the request
/// is never cancelled once started.
pub fn spawn_lookup(
    provider: Option<Arc<dyn InsightProvider>>,
    word: String,
    app_to_ui_tx: AsyncSender<AppEvent>,
) {
    tokio::spawn(async move {
        let insight = match provider {
            Some(provider) => match provider.word_insight(&word).await {
                Ok(insight) => Some(insight),
                Err(e) => {
                    tracing::warn!("lookup for `{word}` produced no data: {e}");
                    None
                }
            },
            None => {
                tracing::warn!("AI lookup requested but no provider is configured");
                None
            }
        };

        if let Err(e) = app_to_ui_tx
            .send(AppEvent::LookupFinished { word, insight })
            .await
        {
            tracing::error!("could not deliver lookup result: {e}");
        }
    });
}
