//! Well-known per-user paths for the data directory, database, config
//! file, PID marker file and IPC socket.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "vocably";

/// Per-user data directory (`~/.local/share/vocably` on Linux).
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

pub fn db_path() -> PathBuf {
    data_dir().join("vocabulary.db")
}

/// PID marker file for the current primary instance.
pub fn pid_path() -> PathBuf {
    data_dir().join("vocably.pid")
}

/// IPC socket owned by the primary instance. Prefers the runtime dir so
/// the socket disappears with the session.
pub fn socket_path() -> PathBuf {
    match env::var_os("XDG_RUNTIME_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir).join("vocably.sock"),
        _ => data_dir().join("vocably.sock"),
    }
}
