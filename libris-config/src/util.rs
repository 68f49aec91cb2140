use std::time::Duration;

use url::Url;

use crate::error::ConfigLoadError;

/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a humantime duration such as `30s` or `1m 30s`. Zero is rejected
/// since a request can never complete within it.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    let parsed = humantime::parse_duration(raw.trim()).map_err(|err| {
        ConfigLoadError::InvalidTimeout {
            value: raw.to_string(),
            reason: err.to_string(),
        }
    })?;
    if parsed.is_zero() {
        return Err(ConfigLoadError::InvalidTimeout {
            value: raw.to_string(),
            reason: "timeout must be greater than zero".into(),
        });
    }
    Ok(parsed)
}

/// Parse and validate a server endpoint. Only `http` and `https` are
/// accepted and a trailing slash is dropped so paths can be appended.
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigLoadError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|err| {
        ConfigLoadError::InvalidEndpoint {
            value: raw.to_string(),
            reason: err.to_string(),
        }
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigLoadError::InvalidEndpoint {
            value: raw.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

/// Treat blank strings as absent.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
