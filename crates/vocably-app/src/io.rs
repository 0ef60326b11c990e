use kanal::{AsyncReceiver, AsyncSender};
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use vocably_instance::Command;
use vocably_types::AppEvent;

/// Pumps instance-bus commands and SIGUSR1 into the event loop.
///
/// SIGUSR1 is the out-of-band fallback for environments where the
/// hotkey helper cannot reach the socket; it carries the same meaning
/// as a `ShowWindow` request.
pub async fn watcher_io(
    instance_commands: AsyncReceiver<Command>,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut show_signal = signal(SignalKind::user_defined1())?;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("watcher stopping");
                break;
            }
            _ = show_signal.recv() => {
                tracing::info!("received SIGUSR1, showing window");
                event_tx.send(AppEvent::ShowWindow).await?;
            }
            command = instance_commands.recv() => {
                let event = match command? {
                    Command::ShowWindow => AppEvent::ShowWindow,
                    Command::HideWindow => AppEvent::HideWindow,
                    Command::Quit => AppEvent::Quit,
                };
                event_tx.send(event).await?;
            }
        }
    }

    Ok(())
}
