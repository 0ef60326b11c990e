//! PID marker file for the current primary, consumed by out-of-band
//! signal delivery (the hotkey helper script).

use std::fs;
use std::path::Path;
use std::process;

pub fn write_pid_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, process::id().to_string())
}

pub fn read_pid_file(path: &Path) -> Option<u32> {
    let data = fs::read_to_string(path).ok()?;
    data.trim().parse().ok()
}

/// Best-effort removal; a missing file is not an error.
pub fn remove_pid_file(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("could not remove pid file {}: {e}", path.display());
        }
    }
}
