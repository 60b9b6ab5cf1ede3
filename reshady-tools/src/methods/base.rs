use std::ffi::OsString;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::MethodError;
use crate::parser::GameRecord;
use crate::runner::CommandResult;
use crate::script::{ScriptPath, SCRIPT_NAME};

/// A frontend-callable operation with a fixed parameter contract.
#[async_trait]
pub trait Method: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// JSON schema of the argument object. Every listed property is a string.
    fn schema(&self) -> serde_json::Value;

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value, MethodError>;
}

/// Result of `install`, `apply_preset`, `toggle` and `remove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MethodResponse {
    Completed(CommandResult),
    ScriptMissing { error: String },
}

impl MethodResponse {
    pub fn script_missing() -> Self {
        Self::ScriptMissing {
            error: script_missing_message(),
        }
    }
}

/// Result of `list_games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ListGamesResponse {
    Listed {
        games: Vec<GameRecord>,
        code: i32,
        stderr: String,
    },
    ScriptMissing {
        error: String,
        games: Vec<GameRecord>,
    },
}

impl ListGamesResponse {
    pub fn script_missing() -> Self {
        Self::ScriptMissing {
            error: script_missing_message(),
            games: Vec::new(),
        }
    }

    pub fn games(&self) -> &[GameRecord] {
        match self {
            Self::Listed { games, .. } | Self::ScriptMissing { games, .. } => games,
        }
    }
}

pub fn script_missing_message() -> String {
    format!("{SCRIPT_NAME} not found")
}

/// Builds `[script, subcommand, --flag, value, ...]`.
pub struct ScriptCommand {
    argv: Vec<OsString>,
}

impl ScriptCommand {
    pub fn new(script: &ScriptPath, subcommand: &str) -> Self {
        Self {
            argv: vec![script.as_arg(), OsString::from(subcommand)],
        }
    }

    pub fn flag(mut self, name: &str, value: &str) -> Self {
        self.argv.push(OsString::from(name));
        self.argv.push(OsString::from(value));
        self
    }

    pub fn build(self) -> Vec<OsString> {
        self.argv
    }
}

pub(crate) fn parse_params<T: DeserializeOwned>(input: serde_json::Value) -> Result<T, MethodError> {
    if !input.is_object() {
        return Err(MethodError::InvalidParams("arguments must be an object".into()));
    }
    serde_json::from_value(input).map_err(|e| MethodError::InvalidParams(e.to_string()))
}

pub(crate) fn string_schema(properties: &[&str]) -> serde_json::Value {
    let props: serde_json::Map<String, serde_json::Value> = properties
        .iter()
        .map(|name| (name.to_string(), serde_json::json!({"type": "string"})))
        .collect();
    serde_json::json!({
        "type": "object",
        "properties": props,
        "required": properties,
    })
}
