use std::path::PathBuf;

use thiserror::Error;

/// Failure while assembling a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid server endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("invalid request timeout {value:?}: {reason}")]
    InvalidTimeout { value: String, reason: String },

    #[error("invalid boolean for {name}: {value:?}")]
    InvalidBool { name: String, value: String },
}
