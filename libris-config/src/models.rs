use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVER_URL};

/// Fully resolved client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub server: ServerConfig,
    /// Run against the in-process demo catalog instead of a server.
    pub offline: bool,
    pub metadata: ConfigMetadata,
}

/// Remote circulation service connection settings.
#[derive(Clone)]
pub struct ServerConfig {
    pub endpoint: Url,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_SERVER_URL)
                .expect("default server url is valid"),
            api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "request_timeout",
                &humantime::format_duration(self.request_timeout).to_string(),
            )
            .finish()
    }
}

/// Where the file layer of the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    /// Path handed to the loader directly (e.g. `--config`).
    Explicit(PathBuf),
    /// Path taken from `LIBRIS_CONFIG_PATH`.
    EnvPath(PathBuf),
    /// One of the default candidate files in the search directory.
    File(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Default => None,
            ConfigSource::Explicit(path)
            | ConfigSource::EnvPath(path)
            | ConfigSource::File(path) => Some(path),
        }
    }
}

/// Provenance details, logged at startup.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub source: ConfigSource,
    /// Environment variables that overrode file or default values.
    pub env_overrides: Vec<&'static str>,
}
