use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{debug, error};

use crate::script::ScriptPath;
use crate::traits::ProcessLauncher;

/// Exit code reported when the child could not be started.
pub const LAUNCH_FAILURE_CODE: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    #[serde(rename = "code")]
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn launch_failure(description: impl Into<String>) -> Self {
        Self {
            exit_code: LAUNCH_FAILURE_CODE,
            stdout: String::new(),
            stderr: description.into(),
        }
    }
}

/// Launches through `std::process::Command` with stdin closed.
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, argv: &[OsString], cwd: &Path) -> io::Result<CommandResult> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandResult {
            exit_code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// The child's exit code, or the negated signal number when a signal killed it.
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| -sig))
        .unwrap_or(LAUNCH_FAILURE_CODE)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(LAUNCH_FAILURE_CODE)
}

/// Runs argument vectors against the plugin directory on the blocking pool.
///
/// `run` never returns an error: launch failures and worker panics come back
/// as a [`CommandResult`] with [`LAUNCH_FAILURE_CODE`].
pub struct CommandRunner {
    script: Arc<ScriptPath>,
    launcher: Arc<dyn ProcessLauncher>,
}

impl CommandRunner {
    pub fn new(script: ScriptPath) -> Self {
        Self::with_launcher(script, Arc::new(SystemLauncher))
    }

    pub fn with_launcher(script: ScriptPath, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self {
            script: Arc::new(script),
            launcher,
        }
    }

    pub fn script(&self) -> &ScriptPath {
        &self.script
    }

    pub async fn run(&self, argv: Vec<OsString>) -> CommandResult {
        if argv.is_empty() {
            error!("Refusing to run an empty command");
            return CommandResult::launch_failure("empty command");
        }

        debug!("Running {:?}", argv);

        let launcher = self.launcher.clone();
        let script = self.script.clone();
        let handle = task::spawn_blocking(move || {
            launcher
                .launch(&argv, script.plugin_dir())
                .map_err(|e| (argv, e))
        });

        match handle.await {
            Ok(Ok(result)) => {
                debug!("Command exited with code {}", result.exit_code);
                result
            }
            Ok(Err((argv, e))) => {
                error!("Command failed: {:?}: {}", argv, e);
                CommandResult::launch_failure(e.to_string())
            }
            Err(join_err) => {
                let description = if join_err.is_panic() {
                    "command worker panicked"
                } else {
                    "command worker cancelled"
                };
                error!("{}", description);
                CommandResult::launch_failure(description)
            }
        }
    }
}
