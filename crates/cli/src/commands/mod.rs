//! CLI command implementations.

pub mod orders;
pub mod session;
pub mod users;

use storekeep_admin::config::DashboardConfig;
use storekeep_admin::fallback::FallbackStore;
use storekeep_admin::services::{OrderService, UserService};
use storekeep_admin::session::SessionStore;
use storekeep_admin::store_api::StoreApiClient;

/// Shared handles for the data commands.
pub struct Context {
    pub api: StoreApiClient,
    pub users: UserService,
    pub orders: OrderService,
    pub sessions: SessionStore,
}

impl Context {
    /// Build the service facades from the environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is malformed or the HTTP
    /// client cannot be built.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = DashboardConfig::from_env()?;
        let api = StoreApiClient::new(&config.api)?;
        let store = FallbackStore::new(&config.data_dir);
        Ok(Self {
            api: api.clone(),
            users: UserService::new(api.clone(), store.clone()),
            orders: OrderService::new(api, store),
            sessions: SessionStore::new(&config.data_dir),
        })
    }
}
