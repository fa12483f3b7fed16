//! Backend entry-point: loads settings, migrates the schema, and serves the API.

mod server;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_web::web;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use service_station::inbound::http::health::HealthState;
use service_station::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use service_station::settings::StationSettings;

use server::{ServerConfig, create_server};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "service-station", about = "Vehicle service station backend")]
struct Cli {
    /// File receiving JSON log lines; opened in append mode.
    #[arg(long = "log_source", default_value = "log.txt")]
    log_source: PathBuf,
    /// TOML settings file; `STATION_*` environment variables override it.
    #[arg(long = "config_source", default_value = "config.toml")]
    config_source: PathBuf,
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))
}

fn init_tracing(log_file: File) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .json()
        .with_writer(Mutex::new(log_file))
        .try_init()
        .map_err(|err| color_eyre::eyre::eyre!("tracing init failed: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(open_log(&cli.log_source)?)?;

    let settings = StationSettings::load(&cli.config_source)?
        .validate()
        .wrap_err("invalid configuration")?;
    info!(
        config_source = %cli.config_source.display(),
        db_host = settings.database.host(),
        db_name = settings.database.name(),
        "configuration loaded"
    );

    let database_url = settings.database.connection_string();
    let migration_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to connect to the database")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings, pool);
    let (host, port) = config.bind_addr();
    info!(%host, port, "starting HTTP server");
    let server = create_server(health_state.clone(), config)?;

    if let Err(err) = server.await {
        health_state.mark_unhealthy();
        error!(error = %err, "HTTP server stopped with an error");
        return Err(err.into());
    }
    Ok(())
}
