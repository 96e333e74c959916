use directories::BaseDirs;
use std::path::PathBuf;

const SOCKET_NAME: &str = "dialkit.sock";

/// Socket the host listens on for gesture commands. Prefers the user runtime
/// directory and falls back to `/tmp`.
pub fn socket_path() -> PathBuf {
    BaseDirs::new()
        .and_then(|dirs| dirs.runtime_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(SOCKET_NAME)
}
