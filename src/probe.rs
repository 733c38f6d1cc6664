//! Filesystem existence probes.
//!
//! Neither probe ever errors: a missing path and a path the process cannot
//! read and write both report `false`.

use std::path::Path;

/// Check that `path` exists and is readable and writable by this process.
pub async fn exists(path: &Path) -> bool {
    if tokio::fs::metadata(path).await.is_err() {
        return false;
    }
    is_read_write(path)
}

/// Check that `path` is an existing directory this process can write into.
pub async fn is_writable_dir(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => is_read_write(path),
        _ => false,
    }
}

#[cfg(unix)]
fn is_read_write(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};

    access(path, AccessFlags::R_OK | AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn is_read_write(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}
