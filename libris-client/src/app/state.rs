//! Top-level application state
//!
//! Single owner of every session object. Commands that cross domains (a
//! logout that must also drop catalog data, checkout reading the catalog)
//! are routed through here.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use libris_model::MediaId;
use log::info;

use crate::domains::auth::{AuthSession, PermissionChecker, UserId, VisibilityFlags};
use crate::domains::catalog::{
    ApplyStatus, CatalogView, CatalogViewModel, SortKey, SortSpec,
};
use crate::domains::checkout::{CheckoutReceipt, CheckoutSession};
use crate::domains::navigation::{VisibleCategory, visible_menu};
use crate::error::{ClientError, ClientResult, ValidationError};
use crate::infrastructure::services::CatalogGateway;

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Search,
    FullView,
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardTab::Search => write!(f, "Search"),
            DashboardTab::FullView => write!(f, "Full View"),
        }
    }
}

impl FromStr for DashboardTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(DashboardTab::Search),
            "full" | "fullview" | "full-view" => Ok(DashboardTab::FullView),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    gateway: Arc<dyn CatalogGateway>,
    auth: AuthSession,
    catalog: CatalogViewModel,
    checkout: CheckoutSession,
    tab: DashboardTab,
}

impl AppState {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            auth: AuthSession::new(Arc::clone(&gateway)),
            catalog: CatalogViewModel::new(Arc::clone(&gateway)),
            checkout: CheckoutSession::new(),
            tab: DashboardTab::default(),
            gateway,
        }
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn catalog(&self) -> &CatalogViewModel {
        &self.catalog
    }

    pub fn checkout(&self) -> &CheckoutSession {
        &self.checkout
    }

    pub fn tab(&self) -> DashboardTab {
        self.tab
    }

    pub fn permissions(&self) -> PermissionChecker {
        PermissionChecker::new(self.auth.rank())
    }

    pub fn visibility(&self) -> VisibilityFlags {
        self.auth.visibility()
    }

    pub fn menu(&self) -> Vec<VisibleCategory> {
        visible_menu(self.permissions().rank())
    }

    pub async fn health_check(&self) -> bool {
        self.gateway.health_check().await
    }

    pub async fn login<I>(&mut self, id: I, password: &str) -> ClientResult<bool>
    where
        I: TryInto<UserId, Error = ValidationError>,
    {
        self.auth.login(id, password).await
    }

    /// Sign out and drop everything fetched under the old session.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.catalog.clear();
        self.checkout.clear();
        self.tab = DashboardTab::default();
        info!("Session state cleared");
    }

    fn require_session(&self) -> ClientResult<()> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::NotAuthenticated)
        }
    }

    /// Full View shows the listing, Search shows the latest results.
    pub fn set_tab(&mut self, tab: DashboardTab) {
        self.tab = tab;
        self.catalog.show(match tab {
            DashboardTab::Search => CatalogView::Search,
            DashboardTab::FullView => CatalogView::Listing,
        });
    }

    pub async fn load_all(&mut self) -> ClientResult<ApplyStatus> {
        self.require_session()?;
        let status = self.catalog.load_all().await?;
        self.follow_catalog_view();
        Ok(status)
    }

    pub async fn search(&mut self, text: &str) -> ClientResult<ApplyStatus> {
        self.require_session()?;
        let status = self.catalog.search(text).await?;
        self.follow_catalog_view();
        Ok(status)
    }

    pub fn set_sort(&mut self, key: SortKey) -> ClientResult<SortSpec> {
        self.require_session()?;
        Ok(self.catalog.set_sort(key))
    }

    pub fn toggle_select(&mut self, id: MediaId) -> ClientResult<bool> {
        self.require_session()?;
        self.catalog.toggle_select(id)
    }

    pub async fn submit_checkout(&mut self) -> ClientResult<CheckoutReceipt> {
        self.require_session()?;
        let receipt = self.checkout.submit(&mut self.catalog).await?;
        self.follow_catalog_view();
        Ok(receipt)
    }

    fn follow_catalog_view(&mut self) {
        self.tab = match self.catalog.view() {
            CatalogView::Listing => DashboardTab::FullView,
            CatalogView::Search => DashboardTab::Search,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::TestCatalogGateway;
    use libris_model::Rank;

    fn state() -> AppState {
        AppState::new(Arc::new(TestCatalogGateway::default()))
    }

    #[tokio::test]
    async fn catalog_commands_need_a_session() {
        let mut state = state();
        assert!(matches!(
            state.load_all().await,
            Err(ClientError::NotAuthenticated)
        ));
        assert!(matches!(
            state.set_sort(SortKey::Name),
            Err(ClientError::NotAuthenticated)
        ));
        assert!(matches!(
            state.toggle_select(MediaId(1001)),
            Err(ClientError::NotAuthenticated)
        ));
        assert_eq!(state.catalog().sort(), None);
    }

    #[tokio::test]
    async fn sort_and_select_stop_after_logout() {
        let mut state = state();
        assert!(state.login("2", "user").await.unwrap());
        state.load_all().await.unwrap();
        assert!(state.set_sort(SortKey::Name).is_ok());
        assert!(state.toggle_select(MediaId(1001)).unwrap());

        state.logout();
        assert!(matches!(
            state.set_sort(SortKey::Vendor),
            Err(ClientError::NotAuthenticated)
        ));
        assert!(matches!(
            state.toggle_select(MediaId(1001)),
            Err(ClientError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn tabs_switch_view_without_touching_the_cart() {
        let mut state = state();
        assert!(state.login("2", "user").await.unwrap());
        state.set_tab(DashboardTab::FullView);
        state.load_all().await.unwrap();
        state.toggle_select(MediaId(1003)).unwrap();

        state.set_tab(DashboardTab::Search);
        state.search("dune").await.unwrap();
        assert_eq!(state.catalog().items().len(), 1);

        state.set_tab(DashboardTab::FullView);
        assert_eq!(state.catalog().items().len(), state.catalog().listing_items().len());
        assert_eq!(state.catalog().selected_ids(), [MediaId(1003)]);
    }

    #[tokio::test]
    async fn logout_clears_auth_and_catalog() {
        let mut state = state();
        assert!(state.login("3", "manager").await.unwrap());
        assert_eq!(state.permissions().rank(), Rank::Manager);
        state.set_tab(DashboardTab::FullView);
        state.load_all().await.unwrap();
        state.toggle_select(MediaId(1001)).unwrap();

        state.logout();
        assert!(!state.auth().is_authenticated());
        assert_eq!(state.visibility(), VisibilityFlags::HIDDEN);
        assert!(state.catalog().items().is_empty());
        assert!(state.catalog().selected_ids().is_empty());
        assert!(state.menu().is_empty());
        assert_eq!(state.tab(), DashboardTab::Search);
    }

    #[test]
    fn tab_names_parse() {
        assert_eq!("full".parse::<DashboardTab>(), Ok(DashboardTab::FullView));
        assert_eq!("Search".parse::<DashboardTab>(), Ok(DashboardTab::Search));
        assert!("placeholder".parse::<DashboardTab>().is_err());
    }
}
