//! Opens documents with the platform's default handler.

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

/// Hand `target` (a URL or path) to the OS opener. Returns once the opener
/// has been spawned; it is reaped in the background.
pub fn open_document(target: &str) -> io::Result<()> {
    spawn_detached(opener_command(target))?;
    tracing::debug!(url = %target, "opened document");
    Ok(())
}

/// Spawn `cmd` with null stdio and wait on it from a background thread.
fn spawn_detached(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(std::thread::spawn(move || {
        let status = child.wait();
        if let Err(e) = &status {
            tracing::warn!(error = %e, "failed to reap document opener");
        }
        status
    }))
}

#[cfg(target_os = "macos")]
fn opener_command(target: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(target);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(target: &str) -> Command {
    let mut cmd = Command::new("explorer");
    cmd.arg(target);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(target: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(target);
    cmd
}
