use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::gateway::BackendClient;
use crate::locale::Locales;

/// Application context containing shared dependencies
/// Built once at startup, read-only across requests
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub backend: Arc<BackendClient>,
    pub locales: Locales,
}

impl AppContext {
    /// Creates a new application context from loaded configuration
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let backend = BackendClient::new(&config.api_base_url, config.backend_timeout_secs)?;
        let locales = Locales::from_config(&config);

        Ok(Self {
            config,
            backend: Arc::new(backend),
            locales,
        })
    }
}
