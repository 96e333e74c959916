use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ExecCommand(String);

dialkit::impl_newtype!(ExecCommand, String);

/// Runs `exec` through the shell, detached from our stdio.
pub fn spawn(exec: &ExecCommand) -> std::io::Result<()> {
    if exec.trim().is_empty() {
        return Ok(());
    }
    Command::new("sh")
        .arg("-c")
        .arg(&exec.0)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
