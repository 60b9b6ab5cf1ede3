//! Parsing of `reshady.sh list-games` output.
//!
//! Each game is one `appid|name|path` line. Lines without a `|` are skipped.
//! Whitespace around the whole output is dropped, not around each line.

use serde::{Deserialize, Serialize};

const SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "appid")]
    pub app_id: String,
    pub name: String,
    pub path: String,
}

pub fn parse_games(stdout: &str) -> Vec<GameRecord> {
    stdout.trim().lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<GameRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    // The path is the remainder after the second separator and may hold more.
    let mut fields = line.splitn(3, SEPARATOR);
    let app_id = fields.next()?;
    let name = fields.next()?;
    let path = fields.next().unwrap_or_default();

    Some(GameRecord {
        app_id: app_id.to_string(),
        name: name.to_string(),
        path: path.to_string(),
    })
}
