use axum::extract::FromRef;

use crate::browse::CatalogBrowser;
use crate::user::UserStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCatalogBrowser = Arc<CatalogBrowser>;
pub type GuardedUserStore = Arc<dyn UserStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub browser: GuardedCatalogBrowser,
    pub user_store: GuardedUserStore,
}

impl FromRef<ServerState> for GuardedCatalogBrowser {
    fn from_ref(input: &ServerState) -> Self {
        input.browser.clone()
    }
}

impl FromRef<ServerState> for GuardedUserStore {
    fn from_ref(input: &ServerState) -> Self {
        input.user_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
