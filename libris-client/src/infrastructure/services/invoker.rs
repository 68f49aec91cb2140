//! The single remote-call boundary
//!
//! Every interaction with the circulation service goes through one
//! `invoke(command, args)` call carrying JSON in both directions. Typed
//! operations live one layer up in [`super::gateway`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GatewayResult;

/// Command names understood by the circulation service.
pub mod commands {
    pub const AUTHENTICATE: &str = "authenticate";
    pub const GET_RANK: &str = "get_rank";
    pub const GET_MEDIA: &str = "get_media";
    pub const SEARCH_MEDIA: &str = "search_media";
    pub const MEDIA_CHECKOUT: &str = "media_checkout";
}

/// Opaque remote procedure call
#[async_trait]
pub trait RemoteInvoker: Send + Sync + std::fmt::Debug {
    /// Run `command` with named `args` (a JSON object, or `Null` for none)
    /// and return the raw response value. Channel failures come back as
    /// transport errors, a body that is not JSON as a decode error.
    async fn invoke(&self, command: &str, args: Value) -> GatewayResult<Value>;

    /// Whether the service endpoint answers at all
    async fn probe(&self) -> bool;
}
