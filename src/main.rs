//! bouncer - Discord moderation bot.
//!
//! Staff issue prefixed commands in listening categories; the bot records
//! warnings, notes and blocks in a local SQLite database.

use bouncer::commands;
use bouncer::config::{self, Config};
use bouncer::db::Database;
use bouncer::handlers::{Context, Dispatcher, Registry};
use bouncer::platform::discord::{self, DiscordPlatform};
use bouncer::telemetry;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "bouncer", version, about = "Discord moderation bot")]
struct Cli {
    /// Directory containing config.toml
    #[arg(short, long, value_name = "DIR")]
    config: PathBuf,

    /// Enable debug logging and reply with invocation ids
    #[arg(long)]
    debug: bool,

    /// Enable trace logging (implies --debug)
    #[arg(long)]
    trace: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = telemetry::level_from_flags(cli.debug, cli.trace);
    telemetry::init(level);

    // Load configuration
    let config = Config::load_dir(&cli.config).map_err(|e| {
        error!(dir = %cli.config.display(), error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid config");
        }
        anyhow::bail!("config has {} error(s)", errors.len());
    }

    info!(
        level = %level,
        prefix = %config.prefix,
        categories = config.categories.listening.len(),
        admin_roles = config.roles.admin.len(),
        "Starting bouncer"
    );

    // Initialize database
    let db_path = config.database_path(&cli.config);
    let db = Database::new(&db_path.to_string_lossy()).await.map_err(|e| {
        error!(path = %db_path.display(), error = %e, "Failed to open database");
        e
    })?;
    info!(path = %db_path.display(), "Database initialized");

    // Register commands
    let registry = Registry::build(commands::all()).map_err(|e| {
        error!(error = %e, "Failed to register commands");
        e
    })?;

    let platform = Arc::new(DiscordPlatform::new(&config.token));
    let token = config.token.clone();
    let ctx = Context::new(platform.clone(), Arc::new(config), db);
    registry.setup(&ctx);
    info!(commands = registry.len(), "Command registry ready");

    let dispatcher = Dispatcher::new(Arc::new(registry), ctx);

    discord::run(&token, platform, Arc::new(dispatcher)).await?;

    info!("Shutdown complete");
    Ok(())
}
