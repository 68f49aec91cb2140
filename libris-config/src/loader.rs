use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CONFIG_CANDIDATES, ENV_API_KEY, ENV_CONFIG_PATH, ENV_OFFLINE,
    ENV_REQUEST_TIMEOUT, ENV_SERVER_URL,
};
use crate::error::ConfigLoadError;
use crate::models::{ClientConfig, ConfigMetadata, ConfigSource, ServerConfig};
use crate::sources::FileConfig;
use crate::util::{non_empty, parse_bool, parse_endpoint, parse_timeout};

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: ClientConfig,
    /// Non-fatal oddities worth surfacing to the user.
    pub warnings: Vec<String>,
}

/// Builds a [`ClientConfig`] from defaults, a TOML file and the environment.
///
/// Evaluation order for the file layer:
/// 1) an explicit path from [`ConfigLoader::with_config_path`],
/// 2) `$LIBRIS_CONFIG_PATH`,
/// 3) the first default candidate found in the search directory,
/// 4) defaults if none of the above exist.
///
/// Environment variables then override individual values.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    search_dir: PathBuf,
    env: Option<HashMap<String, String>>,
    load_dotenv: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            search_dir: PathBuf::from("."),
            env: None,
            load_dotenv: true,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = dir.into();
        self
    }

    /// Use the given variables instead of the process environment. `.env`
    /// files are not consulted in this mode.
    pub fn with_env<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self.load_dotenv = false;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        if self.load_dotenv && self.env.is_none() {
            match dotenvy::dotenv() {
                Ok(path) => log::debug!("[Config] loaded {}", path.display()),
                Err(err) if err.not_found() => {}
                Err(err) => log::warn!("[Config] ignoring .env: {err}"),
            }
        }

        let mut warnings = Vec::new();
        let (file, source) = self.load_file_layer()?;

        let mut server = ServerConfig::default();
        if let Some(endpoint) = non_empty(file.server.endpoint) {
            server.endpoint = parse_endpoint(&endpoint)?;
        }
        server.api_key = non_empty(file.server.api_key);
        if let Some(timeout) = non_empty(file.server.request_timeout) {
            server.request_timeout = parse_timeout(&timeout)?;
        }
        let mut offline = file.offline.unwrap_or(false);

        let mut env_overrides = Vec::new();
        if let Some(endpoint) = non_empty(self.var(ENV_SERVER_URL)) {
            server.endpoint = parse_endpoint(&endpoint)?;
            env_overrides.push(ENV_SERVER_URL);
        }
        if let Some(api_key) = non_empty(self.var(ENV_API_KEY)) {
            server.api_key = Some(api_key);
            env_overrides.push(ENV_API_KEY);
        }
        if let Some(timeout) = non_empty(self.var(ENV_REQUEST_TIMEOUT)) {
            server.request_timeout = parse_timeout(&timeout)?;
            env_overrides.push(ENV_REQUEST_TIMEOUT);
        }
        if let Some(raw) = non_empty(self.var(ENV_OFFLINE)) {
            offline = parse_bool(&raw).ok_or_else(|| {
                ConfigLoadError::InvalidBool {
                    name: ENV_OFFLINE.to_string(),
                    value: raw.clone(),
                }
            })?;
            env_overrides.push(ENV_OFFLINE);
        }

        if server.endpoint.scheme() == "http"
            && server.api_key.is_some()
            && !is_loopback(&server)
        {
            warnings.push(format!(
                "API key will be sent in clear text to {}",
                server.endpoint
            ));
        }

        Ok(ConfigLoad {
            config: ClientConfig {
                server,
                offline,
                metadata: ConfigMetadata {
                    source,
                    env_overrides,
                },
            },
            warnings,
        })
    }

    fn var(&self, name: &str) -> Option<String> {
        match &self.env {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    fn load_file_layer(
        &self,
    ) -> Result<(FileConfig, ConfigSource), ConfigLoadError> {
        if let Some(path) = &self.config_path {
            let config = Self::read_file(path)?;
            return Ok((config, ConfigSource::Explicit(path.clone())));
        }

        if let Some(path) = non_empty(self.var(ENV_CONFIG_PATH)) {
            let path = PathBuf::from(path);
            let config = Self::read_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(path) = self.find_default_file() {
            let config = Self::read_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((FileConfig::default(), ConfigSource::Default))
    }

    fn read_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_CONFIG_CANDIDATES
            .iter()
            .map(|candidate| self.search_dir.join(candidate))
            .find(|path| path.is_file())
    }
}

fn is_loopback(server: &ServerConfig) -> bool {
    matches!(
        server.endpoint.host_str(),
        Some("localhost") | Some("127.0.0.1") | Some("[::1]")
    )
}
