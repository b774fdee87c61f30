use anyhow::Result;
use clap::{Parser, Subcommand};
use colloquy::api;
use colloquy::bootstrap;
use colloquy::config::ColloquyConfig;
use colloquy::telemetry;

#[derive(Parser)]
#[command(author, version, about = "Colloquy forum backend daemon")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (Axum) for REST/API access
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let args = Args::parse();

    let config = ColloquyConfig::from_env()?;
    let resources = bootstrap::initialize(&config).await?;
    tracing::info!(
        directories_created = ?resources.directories_created,
        database_initialized = resources.database_initialized,
        db_path = %config.paths.db_path.display(),
        "bootstrap complete"
    );

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => api::serve_http(config, resources.database).await,
    }
}
