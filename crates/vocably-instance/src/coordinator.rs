//! The claim state machine: probe for a live primary, defer to it, or
//! take the listener identity and serve show/hide/quit requests.

use std::path::{Path, PathBuf};

use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

use crate::pid::{remove_pid_file, write_pid_file};
use crate::protocol::{Command, Reply, Request, send_command};
use crate::{InstanceError, InstanceResult};

/// Well-known identity of the instance bus.
#[derive(Debug, Clone)]
pub struct InstanceEndpoint {
    pub socket: PathBuf,
    pub pid_file: PathBuf,
}

/// Result of probing the endpoint at startup.
pub enum ClaimOutcome {
    /// This process owns the window now; hold the guard until exit.
    Primary(PrimaryGuard),
    /// A primary was already running and accepted `ShowWindow`; this
    /// process should exit successfully.
    Secondary,
}

/// Holds the primary's on-disk footprint (PID marker, socket) and the
/// accept-loop task. `release` must run on every exit path; `Drop` is
/// the backstop.
pub struct PrimaryGuard {
    pid_file: PathBuf,
    socket: Option<PathBuf>,
    server: Option<JoinHandle<()>>,
    released: bool,
}

impl PrimaryGuard {
    /// True when this primary lost the bind race and runs without a
    /// listener.
    pub fn is_degraded(&self) -> bool {
        self.socket.is_none()
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Some(server) = self.server.take() {
            server.abort();
        }
        if let Some(socket) = self.socket.take() {
            if let Err(e) = std::fs::remove_file(&socket) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("could not remove socket {}: {e}", socket.display());
                }
            }
        }
        remove_pid_file(&self.pid_file);
        tracing::info!("instance released");
    }
}

impl Drop for PrimaryGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Probes the endpoint and claims it if nobody answers.
///
/// Accepted commands are forwarded over `commands`; the consumer loop
/// is the single place allowed to touch shell state, so this is the
/// marshaling hop onto the GUI thread. Claim failures are never fatal:
/// the worst outcome is a second, degraded primary.
pub async fn claim(endpoint: &InstanceEndpoint, commands: AsyncSender<Command>) -> ClaimOutcome {
    tracing::debug!("probing instance bus at {}", endpoint.socket.display());

    let probe = send_command(&endpoint.socket, Command::ShowWindow).await;
    match probe {
        Ok(true) => {
            tracing::info!("primary already running, forwarded show request");
            return ClaimOutcome::Secondary;
        }
        Ok(false) => {
            tracing::warn!("primary reachable but refused show request");
        }
        Err(InstanceError::Connect(ref e)) => {
            tracing::debug!("no primary reachable: {e}");
            // A socket file with nobody behind it is leftover from a
            // crashed primary; clear it so the bind can succeed.
            if endpoint.socket.exists() {
                tracing::warn!("removing stale socket {}", endpoint.socket.display());
                let _ = std::fs::remove_file(&endpoint.socket);
            }
        }
        Err(e) => {
            tracing::debug!("probe failed: {e}");
        }
    }

    match bind_listener(&endpoint.socket) {
        Ok(listener) => {
            let server = tokio::spawn(serve(listener, commands));
            ClaimOutcome::Primary(make_guard(endpoint, Some(server)))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            // Lost the bind race; someone else just became primary.
            // Defer to them once more before degrading.
            match send_command(&endpoint.socket, Command::ShowWindow).await {
                Ok(true) => {
                    tracing::info!("lost claim race, forwarded show request to winner");
                    ClaimOutcome::Secondary
                }
                _ => {
                    tracing::warn!(
                        "instance bus unavailable, running as a second primary without a listener"
                    );
                    ClaimOutcome::Primary(make_guard(endpoint, None))
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                "could not bind {}: {e}, running without a listener",
                endpoint.socket.display()
            );
            ClaimOutcome::Primary(make_guard(endpoint, None))
        }
    }
}

fn make_guard(endpoint: &InstanceEndpoint, server: Option<JoinHandle<()>>) -> PrimaryGuard {
    if let Err(e) = write_pid_file(&endpoint.pid_file) {
        tracing::warn!("could not write pid file {}: {e}", endpoint.pid_file.display());
    }

    let socket = server.is_some().then(|| endpoint.socket.clone());
    PrimaryGuard {
        pid_file: endpoint.pid_file.clone(),
        socket,
        server,
        released: false,
    }
}

fn bind_listener(socket: &Path) -> std::io::Result<UnixListener> {
    if let Some(parent) = socket.parent() {
        std::fs::create_dir_all(parent)?;
    }
    UnixListener::bind(socket)
}

async fn serve(listener: UnixListener, commands: AsyncSender<Command>) {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let commands = commands.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, commands).await {
                        tracing::debug!("ipc connection dropped: {e}");
                    }
                });
            }
            Err(e) => {
                tracing::error!("ipc accept failed: {e}");
                break;
            }
        }
    }
}

async fn handle_connection(
    stream: UnixStream,
    commands: AsyncSender<Command>,
) -> InstanceResult<()> {
    let (read_half, mut write_half) = stream.into_split();

    let mut line = String::new();
    BufReader::new(read_half).read_line(&mut line).await?;
    let line = line.trim();
    if line.is_empty() {
        return Ok(());
    }

    // Dispatch failures answer ok:false instead of dropping the
    // connection; the caller decides what to do about it.
    let ok = match serde_json::from_str::<Request>(line) {
        Ok(request) => {
            tracing::info!("ipc request: {:?}", request.cmd);
            commands.send(request.cmd).await.is_ok()
        }
        Err(e) => {
            tracing::warn!("malformed ipc request: {e}");
            false
        }
    };

    let mut frame = serde_json::to_vec(&Reply { ok })?;
    frame.push(b'\n');
    write_half.write_all(&frame).await?;
    Ok(())
}
