use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reshady_tools::{CommandRunner, MethodDispatcher, MethodRegistry, ScriptPath};
use tracing::{error, info};

use crate::config::Config;

/// The backend as the plugin host sees it: two lifecycle hooks and a
/// dispatcher for the frontend methods.
pub struct Plugin {
    runner: Arc<CommandRunner>,
    dispatcher: MethodDispatcher,
    running: AtomicBool,
}

impl Plugin {
    pub fn new(config: &Config) -> Self {
        let script = ScriptPath::resolve(&config.plugin_dir);
        Self::with_runner(Arc::new(CommandRunner::new(script)))
    }

    pub fn with_runner(runner: Arc<CommandRunner>) -> Self {
        let registry = MethodRegistry::with_default_methods(runner.clone());
        Self {
            runner,
            dispatcher: MethodDispatcher::new(Arc::new(registry)),
            running: AtomicBool::new(false),
        }
    }

    pub fn script(&self) -> &ScriptPath {
        self.runner.script()
    }

    pub fn dispatcher(&self) -> &MethodDispatcher {
        &self.dispatcher
    }

    /// True between the startup and shutdown hooks.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Startup hook (`_main`).
    pub async fn main(&self) {
        let script = self.script();
        info!(
            "Reshady backend starting (plugin dir {}, script {})",
            script.plugin_dir().display(),
            script.path().display()
        );
        if let Err(e) = script.ensure_executable() {
            error!("Could not make {} executable: {}", script.path().display(), e);
        }
        self.running.store(true, Ordering::SeqCst);
    }

    /// Shutdown hook (`_unload`). Nothing to release.
    pub async fn unload(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!("Reshady backend unloaded");
    }
}
