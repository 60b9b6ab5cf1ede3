use std::ffi::OsString;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::MethodError;
use crate::methods::base::{parse_params, string_schema, Method, MethodResponse, ScriptCommand};
use crate::runner::CommandRunner;
use crate::script::ScriptPath;

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveParams {
    pub game_path: String,
}

impl RemoveParams {
    pub fn argv(&self, script: &ScriptPath) -> Vec<OsString> {
        ScriptCommand::new(script, "remove")
            .flag("--game-path", &self.game_path)
            .build()
    }
}

pub struct RemoveMethod {
    runner: Arc<CommandRunner>,
}

impl RemoveMethod {
    pub fn new(runner: Arc<CommandRunner>) -> Self {
        Self { runner }
    }

    pub async fn call(&self, params: RemoveParams) -> MethodResponse {
        let script = self.runner.script();
        if !script.exists() {
            return MethodResponse::script_missing();
        }
        tracing::info!("Removing ReShade from {}", params.game_path);
        MethodResponse::Completed(self.runner.run(params.argv(script)).await)
    }
}

#[async_trait]
impl Method for RemoveMethod {
    fn name(&self) -> &'static str {
        "remove"
    }

    fn description(&self) -> &'static str {
        "Removes ReShade from a game"
    }

    fn schema(&self) -> serde_json::Value {
        string_schema(&["game_path"])
    }

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value, MethodError> {
        let params: RemoveParams = parse_params(input)?;
        Ok(serde_json::to_value(self.call(params).await)?)
    }
}
