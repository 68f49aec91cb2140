use std::sync::Arc;

use libris_config::ClientConfig;
use log::info;

use crate::app::state::AppState;
use crate::error::ClientResult;
use crate::infrastructure::ApiClient;
use crate::infrastructure::adapters::RemoteCatalogGateway;
use crate::infrastructure::services::CatalogGateway;
use crate::infrastructure::testing::TestCatalogGateway;

/// Runtime settings for the client
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    use_test_stubs: bool,
}

impl AppConfig {
    /// Offline configs start with the in-process stub gateway.
    pub fn new(client: ClientConfig) -> Self {
        let use_test_stubs = client.offline;
        Self {
            client,
            use_test_stubs,
        }
    }

    pub fn server_url(&self) -> &str {
        self.client.server.endpoint.as_str()
    }

    pub fn use_test_stubs(&self) -> bool {
        self.use_test_stubs
    }

    pub fn with_test_stubs(mut self, enabled: bool) -> Self {
        self.use_test_stubs = enabled;
        self
    }
}

/// Gateway for `config`: the demo catalog in offline mode, the HTTP
/// service otherwise.
pub fn build_gateway(config: &AppConfig) -> ClientResult<Arc<dyn CatalogGateway>> {
    if config.use_test_stubs() {
        info!("Using in-process demo catalog");
        return Ok(Arc::new(TestCatalogGateway::default()));
    }

    let client = ApiClient::new(&config.client.server)?;
    Ok(Arc::new(RemoteCatalogGateway::new(Arc::new(client))))
}

/// Boot logic shared by the binary and tests.
pub fn base_state(config: &AppConfig) -> ClientResult<AppState> {
    Ok(AppState::new(build_gateway(config)?))
}
