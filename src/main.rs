//! Dicey - command line dice roller

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dicey::infrastructure::cli::{self, Cli};
use dicey::infrastructure::config::AppConfig;
use dicey::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicey=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env()?;
    tracing::debug!(
        backend = ?config.storage.kind,
        database = %config.storage.database_path,
        history_limit = config.history_limit,
        "Configuration loaded"
    );

    let state = AppState::new(config).await?;
    tracing::debug!(storage = state.storage.name(), "Storage ready");

    let mut stdout = std::io::stdout().lock();
    cli::run(cli.command, &state, &mut stdout).await
}
