//! Command handlers for the tether binary.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use tether::config::Config;
use tether::{ExchangeClient, Heartbeat};

/// Resolve the server origin: flag first, then env/file/default.
fn resolve_config(server: Option<String>) -> Result<Config> {
    if let Some(server) = server {
        return Ok(Config { server });
    }
    Config::load().with_context(|| "Failed to load configuration")
}

/// Start the heartbeat against the configured server and hold it until
/// Ctrl-C. This is the top-level owner of the timer handle.
pub(crate) async fn cmd_run(server: Option<String>) -> Result<()> {
    let config = resolve_config(server)?;
    let client = ExchangeClient::from_config(&config)
        .with_context(|| format!("Invalid server origin '{}'", config.server))?;

    let heartbeat = Heartbeat::new(Arc::new(client));
    heartbeat.start().await;
    eprintln!("Heartbeat running against {} (Ctrl-C to stop)", config.server);

    tokio::signal::ctrl_c()
        .await
        .with_context(|| "Failed to listen for Ctrl-C")?;

    heartbeat.stop().await;
    eprintln!("Stopped");
    Ok(())
}

/// One immediate liveness probe.
pub(crate) async fn cmd_ping(server: Option<String>) -> Result<()> {
    let config = resolve_config(server)?;
    let client = ExchangeClient::from_config(&config)
        .with_context(|| format!("Invalid server origin '{}'", config.server))?;

    client
        .ping()
        .await
        .with_context(|| format!("Server {} is unreachable", config.server))?;

    println!("{} is reachable", config.server);
    Ok(())
}

/// Perform one JSON exchange with the payload from the argument or stdin
/// and print the response. `--strict` surfaces failures instead of
/// degrading to `{}`.
pub(crate) async fn cmd_send(
    server: Option<String>,
    payload: Option<String>,
    strict: bool,
) -> Result<()> {
    let config = resolve_config(server)?;
    let client = ExchangeClient::from_config(&config)
        .with_context(|| format!("Invalid server origin '{}'", config.server))?;

    let raw = match payload {
        Some(arg) => arg,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| "Failed to read payload from stdin")?;
            buf
        }
    };

    let payload: Value =
        serde_json::from_str(raw.trim()).with_context(|| "Payload is not valid JSON")?;

    let response = if strict {
        client
            .try_exchange(&payload)
            .await
            .with_context(|| "Exchange failed")?
    } else {
        client.exchange(&payload).await
    };

    println!("{}", response);
    Ok(())
}
