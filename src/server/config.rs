use super::RequestsLoggingLevel;
use crate::config::BrowseSettings;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub browse: BrowseSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 4533,
            browse: BrowseSettings::default(),
        }
    }
}
