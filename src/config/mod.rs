mod file_config;

pub use file_config::{BrowseConfig, FileConfig};

use crate::catalog_store::Page;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_db: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub read_pool_size: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_db: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub read_pool_size: usize,

    pub browse: BrowseSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_db = file
            .catalog_db
            .map(PathBuf::from)
            .or_else(|| cli.catalog_db.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("catalog_db must be specified on the command line or in config file")
            })?;

        if catalog_db.is_dir() {
            bail!("catalog_db is a directory: {:?}", catalog_db);
        }
        if let Some(parent) = catalog_db.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Catalog database directory does not exist: {:?}", parent);
            }
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let read_pool_size = file.read_pool_size.unwrap_or(cli.read_pool_size);
        if read_pool_size == 0 {
            bail!("read_pool_size must be at least 1");
        }

        let browse_file = file.browse.unwrap_or_default();
        let defaults = BrowseSettings::default();
        let browse = BrowseSettings {
            default_list_size: browse_file
                .default_list_size
                .unwrap_or(defaults.default_list_size),
            default_search_count: browse_file
                .default_search_count
                .unwrap_or(defaults.default_search_count),
            max_page_size: browse_file.max_page_size.unwrap_or(defaults.max_page_size),
        };
        if browse.max_page_size == 0 {
            bail!("browse.max_page_size must be at least 1");
        }

        Ok(Self {
            catalog_db,
            port,
            logging_level,
            read_pool_size,
            browse,
        })
    }
}

/// Paging defaults for listing and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseSettings {
    /// `getAlbumList2` page size when the client sends no `size`.
    pub default_list_size: usize,
    /// `search3` per-entity count when the client sends none.
    pub default_search_count: usize,
    /// Upper bound on any requested page size.
    pub max_page_size: usize,
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            default_list_size: 10,
            default_search_count: 20,
            max_page_size: 500,
        }
    }
}

impl BrowseSettings {
    /// A page starting at `offset` holding `requested` items (or `default`), capped at `max_page_size`.
    pub fn page(&self, offset: usize, requested: Option<usize>, default: usize) -> Page {
        Page::new(offset, requested.unwrap_or(default).min(self.max_page_size))
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
