#[cfg(test)]
mod tests {
    use reshady_tools::methods::*;
    use reshady_tools::*;
    use serde_json::json;
    use std::ffi::OsString;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    // Records every launch instead of spawning a process
    #[derive(Default)]
    struct RecordingLauncher {
        calls: Mutex<Vec<(Vec<OsString>, PathBuf)>>,
        stdout: String,
        stderr: String,
        exit_code: i32,
    }

    impl RecordingLauncher {
        fn with_output(stdout: &str, exit_code: i32) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code,
            }
        }

        fn with_stderr(mut self, stderr: &str) -> Self {
            self.stderr = stderr.to_string();
            self
        }

        fn spawn_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_argv(&self) -> Vec<OsString> {
            self.calls.lock().unwrap().last().unwrap().0.clone()
        }
    }

    impl ProcessLauncher for RecordingLauncher {
        fn launch(&self, argv: &[OsString], cwd: &Path) -> io::Result<CommandResult> {
            self.calls
                .lock()
                .unwrap()
                .push((argv.to_vec(), cwd.to_path_buf()));
            Ok(CommandResult {
                exit_code: self.exit_code,
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
            })
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        script: ScriptPath,
        launcher: Arc<RecordingLauncher>,
        runner: Arc<CommandRunner>,
    }

    fn fixture(with_script: bool, launcher: RecordingLauncher) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let script = ScriptPath::resolve(dir.path());
        if with_script {
            std::fs::write(script.path(), "#!/bin/sh\n").unwrap();
        }
        let launcher = Arc::new(launcher);
        let runner = Arc::new(CommandRunner::with_launcher(script.clone(), launcher.clone()));
        Fixture {
            _dir: dir,
            script,
            launcher,
            runner,
        }
    }

    fn dispatcher(runner: Arc<CommandRunner>) -> MethodDispatcher {
        MethodDispatcher::new(Arc::new(MethodRegistry::with_default_methods(runner)))
    }

    #[tokio::test]
    async fn test_list_games_without_script_does_not_spawn() {
        let fx = fixture(false, RecordingLauncher::default());
        let response = ListGamesMethod::new(fx.runner.clone()).call().await;

        assert_eq!(response, ListGamesResponse::script_missing());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "reshady.sh not found", "games": []})
        );
        assert_eq!(fx.launcher.spawn_count(), 0);
    }

    #[tokio::test]
    async fn test_every_method_short_circuits_without_script() {
        let fx = fixture(false, RecordingLauncher::default());
        let dispatcher = dispatcher(fx.runner.clone());

        let calls = [
            ("install", json!({"appid": "1", "game_path": "/g", "api": "dxgi", "preset": "p"})),
            ("apply_preset", json!({"game_path": "/g", "preset": "p"})),
            ("toggle", json!({"appid": "1", "game_path": "/g"})),
            ("remove", json!({"game_path": "/g"})),
        ];
        for (name, args) in calls {
            let result = dispatcher.dispatch(name, args).await.unwrap();
            assert_eq!(result, json!({"error": "reshady.sh not found"}), "{name}");
        }
        assert_eq!(fx.launcher.spawn_count(), 0);
    }

    #[tokio::test]
    async fn test_list_games_parses_stdout() {
        let fx = fixture(
            true,
            RecordingLauncher::with_output("123|Game A|/path/to/a\nwarning: slow disk\n456|Game B|/path/to/b\n", 0),
        );
        let response = ListGamesMethod::new(fx.runner.clone()).call().await;

        assert_eq!(response.games().len(), 2);
        assert_eq!(response.games()[1].app_id, "456");
        assert_eq!(fx.launcher.last_argv(), vec![fx.script.as_arg(), OsString::from("list-games")]);
        assert_eq!(fx.launcher.spawn_count(), 1);
    }

    #[tokio::test]
    async fn test_list_games_parses_despite_failure() {
        let fx = fixture(true, RecordingLauncher::with_output("1|x|y\n", 3));
        let dispatcher = dispatcher(fx.runner.clone());
        let result = dispatcher.dispatch("list_games", json!({})).await.unwrap();

        assert_eq!(
            result,
            json!({
                "games": [{"appid": "1", "name": "x", "path": "y"}],
                "code": 3,
                "stderr": ""
            })
        );
    }

    #[tokio::test]
    async fn test_list_games_passes_stderr_and_code() {
        let fx = fixture(
            true,
            RecordingLauncher::with_output("220|Half-Life 2|/games/hl2\n", 1)
                .with_stderr("steamapps/libraryfolders.vdf: permission denied\n"),
        );
        let dispatcher = dispatcher(fx.runner.clone());
        let result = dispatcher.dispatch("list_games", json!({})).await.unwrap();

        assert_eq!(
            result,
            json!({
                "games": [{"appid": "220", "name": "Half-Life 2", "path": "/games/hl2"}],
                "code": 1,
                "stderr": "steamapps/libraryfolders.vdf: permission denied\n"
            })
        );
    }

    #[tokio::test]
    async fn test_install_argv_order() {
        let fx = fixture(true, RecordingLauncher::with_output("", 0));
        let method = InstallMethod::new(fx.runner.clone());
        let response = method
            .call(InstallParams {
                appid: "42".into(),
                game_path: "/g".into(),
                api: "vulkan".into(),
                preset: "default".into(),
            })
            .await;

        assert!(matches!(response, MethodResponse::Completed(ref r) if r.exit_code == 0));
        assert_eq!(
            fx.launcher.last_argv(),
            vec![
                fx.script.as_arg(),
                "install".into(),
                "--appid".into(),
                "42".into(),
                "--game-path".into(),
                "/g".into(),
                "--api".into(),
                "vulkan".into(),
                "--preset".into(),
                "default".into(),
            ]
        );
    }

    #[tokio::test]
    async fn test_runner_uses_plugin_dir_as_cwd() {
        let fx = fixture(true, RecordingLauncher::with_output("", 0));
        let dispatcher = dispatcher(fx.runner.clone());
        dispatcher
            .dispatch("remove", json!({"game_path": "/g"}))
            .await
            .unwrap();

        let calls = fx.launcher.calls.lock().unwrap();
        assert_eq!(calls[0].1, fx.script.plugin_dir());
    }

    #[tokio::test]
    async fn test_dispatch_passes_raw_command_result() {
        let fx = fixture(true, RecordingLauncher::with_output("toggled on\n", 0));
        let dispatcher = dispatcher(fx.runner.clone());
        let result = dispatcher
            .dispatch("toggle", json!({"appid": "7", "game_path": "/g/7"}))
            .await
            .unwrap();

        assert_eq!(result, json!({"code": 0, "stdout": "toggled on\n", "stderr": ""}));
        assert_eq!(
            fx.launcher.last_argv()[1..],
            ["toggle", "--appid", "7", "--game-path", "/g/7"]
        );
    }

    #[tokio::test]
    async fn test_dispatch_unknown_method() {
        let fx = fixture(true, RecordingLauncher::default());
        let dispatcher = dispatcher(fx.runner.clone());
        let result = dispatcher.dispatch("uninstall_everything", json!({})).await;

        assert!(matches!(result, Err(MethodError::UnknownMethod(ref name)) if name == "uninstall_everything"));
        assert_eq!(fx.launcher.spawn_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_missing_params_does_not_spawn() {
        let fx = fixture(true, RecordingLauncher::default());
        let dispatcher = dispatcher(fx.runner.clone());

        let missing = dispatcher
            .dispatch("apply_preset", json!({"game_path": "/g"}))
            .await;
        assert!(matches!(missing, Err(MethodError::InvalidParams(_))));

        let mistyped = dispatcher
            .dispatch("toggle", json!({"appid": 42, "game_path": "/g"}))
            .await;
        assert!(matches!(mistyped, Err(MethodError::InvalidParams(_))));

        let not_object = dispatcher.dispatch("list_games", json!(null)).await;
        assert!(matches!(not_object, Err(MethodError::InvalidParams(_))));

        assert_eq!(fx.launcher.spawn_count(), 0);
    }

    #[tokio::test]
    async fn test_registry_default_methods() {
        let fx = fixture(false, RecordingLauncher::default());
        let registry = MethodRegistry::with_default_methods(fx.runner.clone());

        assert_eq!(registry.count(), 5);
        assert_eq!(
            registry.list(),
            vec!["apply_preset", "install", "list_games", "remove", "toggle"]
        );
        assert!(registry.get("install").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[tokio::test]
    async fn test_registry_schemas() {
        let fx = fixture(false, RecordingLauncher::default());
        let registry = MethodRegistry::with_default_methods(fx.runner.clone());
        let schemas = registry.schemas();

        assert_eq!(schemas.len(), 5);
        let install = schemas.iter().find(|s| s["name"] == "install").unwrap();
        assert_eq!(
            install["parameters"]["required"],
            json!(["appid", "game_path", "api", "preset"])
        );
    }

    #[tokio::test]
    async fn test_registry_chainable() {
        let fx = fixture(false, RecordingLauncher::default());
        let mut registry = MethodRegistry::new();
        assert_eq!(registry.count(), 0);
        registry
            .register(Arc::new(RemoveMethod::new(fx.runner.clone())))
            .register(Arc::new(ToggleMethod::new(fx.runner.clone())));
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_method_error_messages() {
        assert_eq!(
            MethodError::UnknownMethod("x".into()).to_string(),
            "Unknown method: x"
        );
        assert_eq!(
            MethodError::InvalidParams("bad".into()).to_string(),
            "Invalid params: bad"
        );
        assert_eq!(MethodError::Internal.to_string(), "Internal error");
    }
}
