//! Typed catalog gateway trait
//!
//! View-models talk to the service only through this trait so tests and
//! offline mode can swap in [`crate::infrastructure::testing::stubs`].

use async_trait::async_trait;
use libris_model::{MediaItem, Rank};

use crate::error::GatewayResult;

/// Circulation service operations. Each call is one round trip with no
/// retry; failures come back to the caller as typed errors.
#[async_trait]
pub trait CatalogGateway: Send + Sync + std::fmt::Debug {
    /// Check credentials. `Ok(false)` means the service rejected them;
    /// wrong password and unknown account are not distinguished.
    async fn authenticate(&self, id: u32, password: &str) -> GatewayResult<bool>;

    /// Rank of the account from the last successful `authenticate`.
    /// Unrecognised rank labels decode to [`Rank::None`].
    async fn fetch_rank(&self) -> GatewayResult<Rank>;

    /// Complete catalog listing
    async fn fetch_all_media(&self) -> GatewayResult<Vec<MediaItem>>;

    /// Service-defined text search. An empty query is passed through as is.
    async fn search_media(&self, query: &str) -> GatewayResult<Vec<MediaItem>>;

    /// Reserve `batch` and return the service's listing afterwards
    async fn submit_checkout(
        &self,
        batch: &[MediaItem],
    ) -> GatewayResult<Vec<MediaItem>>;

    /// Reachability probe, used at startup only
    async fn health_check(&self) -> bool;
}
