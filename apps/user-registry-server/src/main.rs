use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use registry_db::{ConnectOpts, DbHandle};
use runtime::{AppConfig, CliArgs};
use sea_orm_migration::MigratorTrait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use user_registry::domain::service::Service;
use user_registry::infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmUsersRepository};

mod error_layer;
mod request_id;
mod web;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// User Registry Server - REST API for user profile records
#[derive(Parser)]
#[command(name = "user-registry-server")]
#[command(about = "User Registry Server - REST API for user profile records")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database instead of the configured one
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::config::default_logging_config);
    runtime::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("User Registry Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
        Commands::Migrate => migrate_only(config).await,
    }
}

async fn connect_db(config: &AppConfig) -> Result<DbHandle> {
    let db_config = config
        .database
        .as_ref()
        .context("database configuration is missing")?;

    let defaults = ConnectOpts::default();
    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns.or(defaults.max_conns),
        acquire_timeout: db_config
            .acquire_timeout_sec
            .map(Duration::from_secs)
            .or(defaults.acquire_timeout),
        create_sqlite_dirs: true,
    };

    let dsn = absolutize_sqlite_dsn(db_config.url.trim(), &config.home_dir());
    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .context("failed to connect to the database")?;
    tracing::info!(dsn = %db.redacted_dsn(), engine = ?db.engine(), "Connected to database");
    Ok(db)
}

/// Resolve a relative SQLite file path against `base_dir`; other DSNs pass through.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> String {
    let Some(path) = dsn.strip_prefix("sqlite://") else {
        return dsn.to_string();
    };
    let (path_str, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };
    if path_str.is_empty() || path_str == ":memory:" || Path::new(path_str).is_absolute() {
        return dsn.to_string();
    }

    let mut out = String::from("sqlite://");
    out.push_str(&base_dir.join(path_str).to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    out
}

async fn apply_migrations(db: &DbHandle) -> Result<()> {
    Migrator::up(&db.sea(), None)
        .await
        .context("failed to apply database migrations")?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    let db = connect_db(&config).await?;
    apply_migrations(&db).await?;

    let repo = SeaOrmUsersRepository::new(db.sea());
    let service = Arc::new(Service::new(Arc::new(repo)));
    let router = web::build_router(&config.server, service);

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!("HTTP server bound on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped; closing database pool");
    db.close().await;
    Ok(())
}

async fn migrate_only(config: AppConfig) -> Result<()> {
    config.validate()?;

    let db = connect_db(&config).await?;
    apply_migrations(&db).await?;
    db.close().await;

    println!("Migrations applied");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("HTTP server shutting down gracefully");
}
