//! Typed gateway over a [`RemoteInvoker`]
//!
//! Owns the wire contract: command names, argument shapes and response
//! decoding. Nothing above this layer sees raw JSON.

use std::sync::Arc;

use async_trait::async_trait;
use libris_model::{MediaItem, Rank};
use log::{debug, warn};
use serde_json::{Value, json};

use crate::error::{DecodeError, GatewayResult};
use crate::infrastructure::services::{CatalogGateway, RemoteInvoker, commands};

/// Adapter that implements [`CatalogGateway`] on top of a remote invoker
#[derive(Debug, Clone)]
pub struct RemoteCatalogGateway {
    invoker: Arc<dyn RemoteInvoker>,
}

impl RemoteCatalogGateway {
    pub fn new(invoker: Arc<dyn RemoteInvoker>) -> Self {
        Self { invoker }
    }

    async fn fetch_items(
        &self,
        command: &'static str,
        args: Value,
    ) -> GatewayResult<Vec<MediaItem>> {
        let payload = self.invoker.invoke(command, args).await?;
        let items = decode_media_list(command, payload)?;
        debug!("[Gateway] `{}` returned {} items", command, items.len());
        Ok(items)
    }
}

#[async_trait]
impl CatalogGateway for RemoteCatalogGateway {
    async fn authenticate(&self, id: u32, password: &str) -> GatewayResult<bool> {
        let payload = self
            .invoker
            .invoke(
                commands::AUTHENTICATE,
                json!({ "id": id, "password": password }),
            )
            .await?;
        Ok(decode_bool(commands::AUTHENTICATE, payload)?)
    }

    async fn fetch_rank(&self) -> GatewayResult<Rank> {
        let payload = self.invoker.invoke(commands::GET_RANK, Value::Null).await?;
        Ok(decode_rank(payload)?)
    }

    async fn fetch_all_media(&self) -> GatewayResult<Vec<MediaItem>> {
        self.fetch_items(commands::GET_MEDIA, Value::Null).await
    }

    async fn search_media(&self, query: &str) -> GatewayResult<Vec<MediaItem>> {
        self.fetch_items(commands::SEARCH_MEDIA, json!({ "search": query }))
            .await
    }

    async fn submit_checkout(
        &self,
        batch: &[MediaItem],
    ) -> GatewayResult<Vec<MediaItem>> {
        // The service takes the cart as a JSON-encoded string, not an array.
        let cart = serde_json::to_string(batch).map_err(|source| {
            DecodeError::Payload {
                command: commands::MEDIA_CHECKOUT,
                source,
            }
        })?;
        self.fetch_items(commands::MEDIA_CHECKOUT, json!({ "cart": cart }))
            .await
    }

    async fn health_check(&self) -> bool {
        self.invoker.probe().await
    }
}

fn decode_bool(command: &'static str, payload: Value) -> Result<bool, DecodeError> {
    match payload {
        Value::Bool(value) => Ok(value),
        Value::String(text) => match text.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(DecodeError::Shape {
                command,
                expected: "a boolean",
            }),
        },
        _ => Err(DecodeError::Shape {
            command,
            expected: "a boolean",
        }),
    }
}

/// Rank labels the client does not know fail closed to [`Rank::None`].
fn decode_rank(payload: Value) -> Result<Rank, DecodeError> {
    let label = match payload {
        Value::String(label) => label,
        Value::Null => String::new(),
        _ => {
            return Err(DecodeError::Shape {
                command: commands::GET_RANK,
                expected: "a rank label",
            });
        }
    };
    let label = label.trim().trim_matches('"');
    match label.parse::<Rank>() {
        Ok(rank) => Ok(rank),
        Err(_) => {
            warn!("[Gateway] Unrecognised rank {:?}, treating as None", label);
            Ok(Rank::None)
        }
    }
}

/// Accepts a JSON array or a string holding the JSON-encoded array.
fn decode_media_list(
    command: &'static str,
    payload: Value,
) -> Result<Vec<MediaItem>, DecodeError> {
    let decoded: serde_json::Result<Vec<MediaItem>> = match payload {
        Value::Array(items) => serde_json::from_value(Value::Array(items)),
        Value::String(encoded) => serde_json::from_str(&encoded),
        _ => {
            return Err(DecodeError::Shape {
                command,
                expected: "a JSON array of media items",
            });
        }
    };
    decoded.map_err(|source| DecodeError::Payload { command, source })
}
