//! Wire protocol of the instance bus: one JSON request line, one JSON
//! reply line per connection.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::{InstanceError, InstanceResult};

/// Upper bound for one remote call, connect included.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ShowWindow,
    HideWindow,
    Quit,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Request {
    pub cmd: Command,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Reply {
    pub ok: bool,
}

/// Sends one command to the primary listening on `socket` and returns
/// whether it accepted the call. Never blocks past [`CALL_TIMEOUT`].
pub async fn send_command(socket: &Path, cmd: Command) -> InstanceResult<bool> {
    match timeout(CALL_TIMEOUT, call(socket, cmd)).await {
        Ok(result) => result,
        Err(_) => Err(InstanceError::Timeout),
    }
}

async fn call(socket: &Path, cmd: Command) -> InstanceResult<bool> {
    let stream = UnixStream::connect(socket)
        .await
        .map_err(InstanceError::Connect)?;

    let (read_half, mut write_half) = stream.into_split();

    let mut frame = serde_json::to_vec(&Request { cmd })?;
    frame.push(b'\n');
    write_half.write_all(&frame).await?;

    let mut line = String::new();
    BufReader::new(read_half).read_line(&mut line).await?;
    let reply: Reply = serde_json::from_str(line.trim())?;
    Ok(reply.ok)
}
