use std::ffi::OsString;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::MethodError;
use crate::methods::base::{parse_params, string_schema, Method, MethodResponse, ScriptCommand};
use crate::runner::CommandRunner;
use crate::script::ScriptPath;

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyPresetParams {
    pub game_path: String,
    pub preset: String,
}

impl ApplyPresetParams {
    pub fn argv(&self, script: &ScriptPath) -> Vec<OsString> {
        ScriptCommand::new(script, "preset")
            .flag("--game-path", &self.game_path)
            .flag("--preset", &self.preset)
            .build()
    }
}

pub struct ApplyPresetMethod {
    runner: Arc<CommandRunner>,
}

impl ApplyPresetMethod {
    pub fn new(runner: Arc<CommandRunner>) -> Self {
        Self { runner }
    }

    pub async fn call(&self, params: ApplyPresetParams) -> MethodResponse {
        let script = self.runner.script();
        if !script.exists() {
            return MethodResponse::script_missing();
        }
        tracing::info!("Applying preset {} to {}", params.preset, params.game_path);
        MethodResponse::Completed(self.runner.run(params.argv(script)).await)
    }
}

#[async_trait]
impl Method for ApplyPresetMethod {
    fn name(&self) -> &'static str {
        "apply_preset"
    }

    fn description(&self) -> &'static str {
        "Switches an installed game to another ReShade preset"
    }

    fn schema(&self) -> serde_json::Value {
        string_schema(&["game_path", "preset"])
    }

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value, MethodError> {
        let params: ApplyPresetParams = parse_params(input)?;
        Ok(serde_json::to_value(self.call(params).await)?)
    }
}
