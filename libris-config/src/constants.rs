//! Defaults and environment variable names.

use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Files probed in the search directory when no path is configured.
pub const DEFAULT_CONFIG_CANDIDATES: &[&str] =
    &["libris.toml", "config/libris.toml"];

pub const ENV_CONFIG_PATH: &str = "LIBRIS_CONFIG_PATH";
pub const ENV_SERVER_URL: &str = "LIBRIS_SERVER_URL";
pub const ENV_API_KEY: &str = "LIBRIS_API_KEY";
pub const ENV_REQUEST_TIMEOUT: &str = "LIBRIS_REQUEST_TIMEOUT";
pub const ENV_OFFLINE: &str = "LIBRIS_OFFLINE";
