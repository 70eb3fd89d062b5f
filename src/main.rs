//! Org Dashboard
//!
//! Interactive terminal client for the multi-tenant SaaS admin backend.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orgdash::config::Config;
use orgdash::shell::{parse_line, Flow, Session};
use orgdash::storage::FileStorage;
use orgdash::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging; stdout belongs to the session
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting Org Dashboard");
    tracing::info!("API base URL: {}", config.api_base_url);
    tracing::info!("Storage path: {:?}", config.storage_path);

    let storage = Arc::new(FileStorage::open(&config.storage_path)?);
    let app = AppState::new(&config, storage)?;

    let mut session = Session::new(app);
    print!("{}", session.start().await);
    println!("Type `help` for the list of commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("orgdash> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message.trim_end());
                continue;
            }
        };

        match session.execute(command).await {
            Flow::Continue(output) => print!("{}", output),
            Flow::Quit => break,
        }
    }

    tracing::info!("Session closed");
    Ok(())
}
