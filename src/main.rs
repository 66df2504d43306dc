use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subsonic_catalog_server::config::{AppConfig, CliConfig, FileConfig};
use subsonic_catalog_server::{run_server, CatalogStore, RequestsLoggingLevel, SqliteCatalogStore};

/// Resolves a path argument to an absolute path. Missing files are fine,
/// the catalog database is created on first start.
fn parse_path(s: &str) -> Result<PathBuf> {
    let path = PathBuf::from(s);
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(std::path::absolute(&path)?),
        Err(e) => Err(e).with_context(|| format!("Error resolving path: {}", s)),
    }
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite catalog database file. Created with an empty schema if missing.
    #[clap(value_parser = parse_path)]
    pub catalog_db: Option<PathBuf>,

    /// Path to a TOML config file. Values in the file override command line arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// HTTP port of the Subsonic API.
    #[clap(short, long, default_value_t = 4533)]
    pub port: u16,

    /// How much of each request and response to log.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Number of read-only connections kept open on the catalog database.
    #[clap(long, default_value_t = 4)]
    pub read_pool_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let cli_config = CliConfig {
        catalog_db: cli_args.catalog_db,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        read_pool_size: cli_args.read_pool_size,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening SQLite catalog database at {:?}...", config.catalog_db);
    let store = Arc::new(SqliteCatalogStore::new(
        &config.catalog_db,
        config.read_pool_size,
    )?);
    info!(
        "Catalog ready: {} artists, {} albums, {} tracks",
        store.get_artists_count()?,
        store.get_albums_count()?,
        store.get_tracks_count()?
    );

    info!("Ready to serve at port {}!", config.port);
    run_server(
        store.clone(),
        store,
        config.logging_level,
        config.port,
        config.browse,
    )
    .await
}
