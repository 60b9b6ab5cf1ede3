use std::sync::Arc;

use anyhow::{Context, Result};
use reshady_app::{host, logging, Config, Plugin};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to resolve plugin configuration")?;
    logging::init(&config.log_level);

    let plugin = Arc::new(Plugin::new(&config));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    host::serve(
        plugin,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        shutdown,
    )
    .await
    .context("Host bridge failed")?;

    Ok(())
}
