use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use libris_model::{MediaItem, Rank};

use crate::error::{GatewayResult, TransportError};
use crate::infrastructure::services::{CatalogGateway, commands};
use crate::infrastructure::testing::fixtures::{
    DemoAccount, sample_accounts, sample_catalog,
};

/// In-memory circulation service.
///
/// Search matches names case-insensitively by substring. Checkout rents
/// every item in the cart to the signed-in account, or rejects the whole
/// cart if any item is no longer borrowable.
#[derive(Debug, Clone)]
pub struct TestCatalogGateway {
    inner: Arc<RwLock<InnerGatewayState>>,
}

#[derive(Debug, Clone)]
struct InnerGatewayState {
    accounts: Vec<DemoAccount>,
    media: Vec<MediaItem>,
    current_user: Option<DemoAccount>,
    calls: Vec<String>,
    failures: VecDeque<(String, String)>,
    reachable: bool,
}

impl Default for TestCatalogGateway {
    fn default() -> Self {
        Self::new(sample_accounts(), sample_catalog())
    }
}

impl TestCatalogGateway {
    pub fn new(accounts: Vec<DemoAccount>, media: Vec<MediaItem>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(InnerGatewayState {
                accounts,
                media,
                current_user: None,
                calls: Vec::new(),
                failures: VecDeque::new(),
                reachable: true,
            })),
        }
    }

    pub fn set_media(&self, media: Vec<MediaItem>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.media = media;
        }
    }

    pub fn set_reachable(&self, value: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.reachable = value;
        }
    }

    /// Make the next call of `command` fail with a transport error.
    pub fn fail_next(&self, command: &str, message: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard
                .failures
                .push_back((command.to_string(), message.into()));
        }
    }

    /// Commands received so far, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| guard.calls.clone())
            .unwrap_or_default()
    }

    pub fn media(&self) -> Vec<MediaItem> {
        self.inner
            .read()
            .map(|guard| guard.media.clone())
            .unwrap_or_default()
    }

    fn with_state<T>(
        &self,
        command: &str,
        f: impl FnOnce(&mut InnerGatewayState) -> Result<T, TransportError>,
    ) -> GatewayResult<T> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| TransportError::RequestFailed("stub state poisoned".into()))?;
        guard.calls.push(command.to_string());
        if let Some(pos) = guard.failures.iter().position(|(name, _)| name == command)
            && let Some((_, message)) = guard.failures.remove(pos)
        {
            return Err(TransportError::RequestFailed(message).into());
        }
        Ok(f(&mut guard)?)
    }
}

fn rejected(command: &str, message: &str) -> TransportError {
    TransportError::Rejected {
        command: command.to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl CatalogGateway for TestCatalogGateway {
    async fn authenticate(&self, id: u32, password: &str) -> GatewayResult<bool> {
        self.with_state(commands::AUTHENTICATE, |state| {
            let account = state
                .accounts
                .iter()
                .find(|account| account.id == id && account.password == password)
                .cloned();
            let accepted = account.is_some();
            state.current_user = account;
            Ok(accepted)
        })
    }

    async fn fetch_rank(&self) -> GatewayResult<Rank> {
        self.with_state(commands::GET_RANK, |state| {
            state
                .current_user
                .as_ref()
                .map(|account| account.rank)
                .ok_or_else(|| rejected(commands::GET_RANK, "not signed in"))
        })
    }

    async fn fetch_all_media(&self) -> GatewayResult<Vec<MediaItem>> {
        self.with_state(commands::GET_MEDIA, |state| Ok(state.media.clone()))
    }

    async fn search_media(&self, query: &str) -> GatewayResult<Vec<MediaItem>> {
        let needle = query.trim().to_lowercase();
        self.with_state(commands::SEARCH_MEDIA, |state| {
            Ok(state
                .media
                .iter()
                .filter(|item| item.name().to_lowercase().contains(&needle))
                .cloned()
                .collect())
        })
    }

    async fn submit_checkout(
        &self,
        batch: &[MediaItem],
    ) -> GatewayResult<Vec<MediaItem>> {
        self.with_state(commands::MEDIA_CHECKOUT, |state| {
            let renter = state
                .current_user
                .as_ref()
                .map(|account| account.name.clone())
                .ok_or_else(|| rejected(commands::MEDIA_CHECKOUT, "not signed in"))?;

            let unavailable = batch.iter().find(|wanted| {
                !state
                    .media
                    .iter()
                    .any(|item| item.id() == wanted.id() && item.borrowable())
            });
            if let Some(item) = unavailable {
                return Err(rejected(
                    commands::MEDIA_CHECKOUT,
                    &format!("item {} is not available", item.id()),
                ));
            }

            for item in state.media.iter_mut() {
                if batch.iter().any(|wanted| wanted.id() == item.id()) {
                    *item = item.rented_by(renter.clone());
                }
            }
            Ok(state.media.clone())
        })
    }

    async fn health_check(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.reachable)
            .unwrap_or(false)
    }
}
