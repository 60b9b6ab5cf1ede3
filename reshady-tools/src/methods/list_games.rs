use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::error::MethodError;
use crate::methods::base::{parse_params, ListGamesResponse, Method, ScriptCommand};
use crate::parser::parse_games;
use crate::runner::CommandRunner;

pub struct ListGamesMethod {
    runner: Arc<CommandRunner>,
}

impl ListGamesMethod {
    pub fn new(runner: Arc<CommandRunner>) -> Self {
        Self { runner }
    }

    pub async fn call(&self) -> ListGamesResponse {
        let script = self.runner.script();
        if !script.exists() {
            tracing::warn!("{} missing, cannot list games", script.path().display());
            return ListGamesResponse::script_missing();
        }

        let result = self
            .runner
            .run(ScriptCommand::new(script, "list-games").build())
            .await;

        // Parsed regardless of exit code; the script may list some games and still fail.
        let games = parse_games(&result.stdout);
        tracing::info!("Listed {} games (exit code {})", games.len(), result.exit_code);

        ListGamesResponse::Listed {
            games,
            code: result.exit_code,
            stderr: result.stderr,
        }
    }
}

#[async_trait]
impl Method for ListGamesMethod {
    fn name(&self) -> &'static str {
        "list_games"
    }

    fn description(&self) -> &'static str {
        "Lists installed games as appid, name and install path"
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value, MethodError> {
        let _: serde_json::Map<String, serde_json::Value> = parse_params(input)?;
        Ok(serde_json::to_value(self.call().await)?)
    }
}
