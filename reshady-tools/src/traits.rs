use std::ffi::OsString;
use std::io;
use std::path::Path;

use crate::runner::CommandResult;

/// Starts a child process and blocks until it exits.
///
/// Called from tokio's blocking pool, never from an async task directly.
pub trait ProcessLauncher: Send + Sync {
    fn launch(&self, argv: &[OsString], cwd: &Path) -> io::Result<CommandResult>;
}
