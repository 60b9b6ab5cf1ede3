use std::ffi::OsString;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::MethodError;
use crate::methods::base::{parse_params, string_schema, Method, MethodResponse, ScriptCommand};
use crate::runner::CommandRunner;
use crate::script::ScriptPath;

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleParams {
    pub appid: String,
    pub game_path: String,
}

impl ToggleParams {
    pub fn argv(&self, script: &ScriptPath) -> Vec<OsString> {
        ScriptCommand::new(script, "toggle")
            .flag("--appid", &self.appid)
            .flag("--game-path", &self.game_path)
            .build()
    }
}

pub struct ToggleMethod {
    runner: Arc<CommandRunner>,
}

impl ToggleMethod {
    pub fn new(runner: Arc<CommandRunner>) -> Self {
        Self { runner }
    }

    pub async fn call(&self, params: ToggleParams) -> MethodResponse {
        let script = self.runner.script();
        if !script.exists() {
            return MethodResponse::script_missing();
        }
        tracing::info!("Toggling ReShade for {} at {}", params.appid, params.game_path);
        MethodResponse::Completed(self.runner.run(params.argv(script)).await)
    }
}

#[async_trait]
impl Method for ToggleMethod {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn description(&self) -> &'static str {
        "Enables or disables ReShade for a game"
    }

    fn schema(&self) -> serde_json::Value {
        string_schema(&["appid", "game_path"])
    }

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value, MethodError> {
        let params: ToggleParams = parse_params(input)?;
        Ok(serde_json::to_value(self.call(params).await)?)
    }
}
