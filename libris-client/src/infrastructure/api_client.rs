use std::time::Duration;

use async_trait::async_trait;
use libris_config::ServerConfig;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{DecodeError, GatewayResult, TransportError};
use crate::infrastructure::services::RemoteInvoker;

/// Header carrying the configured service key
const API_KEY_HEADER: &str = "apikey";

/// HTTP implementation of [`RemoteInvoker`]
///
/// Each command is a `POST {endpoint}/invoke/{command}` with the arguments as
/// a JSON body. The session established by `authenticate` rides on cookies,
/// so one client must be reused for the whole sign-in.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &self.api_key.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &ServerConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| TransportError::RequestFailed(err.to_string()))?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            config.endpoint
        );

        Ok(Self {
            client,
            base_url: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for a command, keeping any path prefix of the endpoint
    pub fn command_url(&self, command: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::RequestFailed(format!(
                    "endpoint {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("invoke")
            .push(command);
        Ok(url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            warn!(
                "[ApiClient] Request timed out after {}",
                humanize(self.timeout)
            );
            TransportError::Timeout
        } else {
            TransportError::RequestFailed(err.to_string())
        }
    }
}

#[async_trait]
impl RemoteInvoker for ApiClient {
    async fn invoke(&self, command: &str, args: Value) -> GatewayResult<Value> {
        let url = self.command_url(command)?;
        debug!("[ApiClient] POST {}", url);

        let mut request = self.client.post(url).json(&args);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response =
            request.send().await.map_err(|err| self.map_send_error(err))?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|err| self.map_send_error(err))?;
                let body: Value =
                    serde_json::from_slice(&bytes).map_err(|source| {
                        warn!(
                            "[ApiClient] `{}` answered with a body that is not JSON",
                            command
                        );
                        DecodeError::Body {
                            command: command.to_string(),
                            source,
                        }
                    })?;
                match rejection(command, &body) {
                    Some(err) => Err(err.into()),
                    None => Ok(body),
                }
            }
            StatusCode::UNAUTHORIZED => {
                warn!("[ApiClient] `{}` was refused by the service", command);
                Err(TransportError::Status {
                    status: StatusCode::UNAUTHORIZED.as_u16(),
                    message: "unauthorized".to_string(),
                }
                .into())
            }
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(TransportError::Status {
                    status: status.as_u16(),
                    message: error_text,
                }
                .into())
            }
        }
    }

    async fn probe(&self) -> bool {
        match self.client.get(self.base_url.clone()).send().await {
            Ok(response) => {
                debug!(
                    "[ApiClient] Health probe answered with {}",
                    response.status()
                );
                !response.status().is_server_error()
            }
            Err(err) => {
                warn!("[ApiClient] Health probe failed: {}", err);
                false
            }
        }
    }
}

/// A 2xx body of the form `{"error": "..."}` is a command-level failure.
fn rejection(command: &str, body: &Value) -> Option<TransportError> {
    let object = body.as_object()?;
    if object.len() != 1 {
        return None;
    }
    let message = object.get("error")?.as_str()?;
    Some(TransportError::Rejected {
        command: command.to_string(),
        message: message.to_string(),
    })
}

fn humanize(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f32())
}
