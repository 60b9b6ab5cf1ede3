use std::ffi::OsString;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::MethodError;
use crate::methods::base::{parse_params, string_schema, Method, MethodResponse, ScriptCommand};
use crate::runner::CommandRunner;
use crate::script::ScriptPath;

#[derive(Debug, Clone, Deserialize)]
pub struct InstallParams {
    pub appid: String,
    pub game_path: String,
    pub api: String,
    pub preset: String,
}

impl InstallParams {
    pub fn argv(&self, script: &ScriptPath) -> Vec<OsString> {
        ScriptCommand::new(script, "install")
            .flag("--appid", &self.appid)
            .flag("--game-path", &self.game_path)
            .flag("--api", &self.api)
            .flag("--preset", &self.preset)
            .build()
    }
}

pub struct InstallMethod {
    runner: Arc<CommandRunner>,
}

impl InstallMethod {
    pub fn new(runner: Arc<CommandRunner>) -> Self {
        Self { runner }
    }

    pub async fn call(&self, params: InstallParams) -> MethodResponse {
        let script = self.runner.script();
        if !script.exists() {
            return MethodResponse::script_missing();
        }
        tracing::info!(
            "Installing ReShade ({}, {}) for {} at {}",
            params.api,
            params.preset,
            params.appid,
            params.game_path
        );
        MethodResponse::Completed(self.runner.run(params.argv(script)).await)
    }
}

#[async_trait]
impl Method for InstallMethod {
    fn name(&self) -> &'static str {
        "install"
    }

    fn description(&self) -> &'static str {
        "Installs ReShade into a game with the given graphics API and preset"
    }

    fn schema(&self) -> serde_json::Value {
        string_schema(&["appid", "game_path", "api", "preset"])
    }

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value, MethodError> {
        let params: InstallParams = parse_params(input)?;
        Ok(serde_json::to_value(self.call(params).await)?)
    }
}
