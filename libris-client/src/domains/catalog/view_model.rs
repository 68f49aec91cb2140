use std::sync::Arc;

use libris_model::{MediaId, MediaItem};
use log::{debug, info, warn};

use super::requests::{
    ApplyStatus, CompletedRequest, PendingRequest, RequestKind, RequestTicket,
};
use super::selection::SelectionSet;
use super::types::{CatalogSnapshot, CatalogView, SnapshotKind, SortKey, SortSpec};
use crate::error::{ClientError, ClientResult};
use crate::infrastructure::services::CatalogGateway;

/// In-memory catalog state behind the dashboard.
///
/// Keeps the latest full listing and the latest search results apart. The
/// selection and the checkout batch always refer to the full listing, so a
/// search never touches what the user has picked. Loads go through
/// [`CatalogViewModel::begin_load_all`] and friends so callers can run
/// several requests at once; [`CatalogViewModel::complete`] decides which
/// responses still count.
#[derive(Debug)]
pub struct CatalogViewModel {
    gateway: Arc<dyn CatalogGateway>,
    listing: Option<CatalogSnapshot>,
    search_results: Option<CatalogSnapshot>,
    view: CatalogView,
    sort: Option<SortSpec>,
    selection: SelectionSet,
    next_seq: u64,
    last_applied: u64,
}

impl CatalogViewModel {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            listing: None,
            search_results: None,
            view: CatalogView::default(),
            sort: None,
            selection: SelectionSet::default(),
            next_seq: 0,
            last_applied: 0,
        }
    }

    fn issue(&mut self, kind: RequestKind) -> RequestTicket {
        self.next_seq += 1;
        RequestTicket {
            seq: self.next_seq,
            kind,
        }
    }

    /// Issue a full listing fetch.
    pub fn begin_load_all(&mut self) -> PendingRequest {
        let ticket = self.issue(RequestKind::FullListing);
        debug!("[Catalog] Issuing full listing #{}", ticket.seq());
        let gateway = Arc::clone(&self.gateway);
        PendingRequest::new(
            ticket,
            Box::pin(async move { gateway.fetch_all_media().await }),
        )
    }

    /// Issue a search. The empty query is passed through unchanged.
    pub fn begin_search(&mut self, text: impl Into<String>) -> PendingRequest {
        let query = text.into();
        let ticket = self.issue(RequestKind::Search {
            query: query.clone(),
        });
        debug!("[Catalog] Issuing search #{} for {:?}", ticket.seq(), query);
        let gateway = Arc::clone(&self.gateway);
        PendingRequest::new(
            ticket,
            Box::pin(async move { gateway.search_media(&query).await }),
        )
    }

    /// Issue a checkout of `batch`. Callers validate the batch first.
    pub(crate) fn begin_checkout(&mut self, batch: Vec<MediaItem>) -> PendingRequest {
        let ticket = self.issue(RequestKind::Checkout {
            submitted: batch.len(),
        });
        debug!(
            "[Catalog] Issuing checkout #{} of {} items",
            ticket.seq(),
            batch.len()
        );
        let gateway = Arc::clone(&self.gateway);
        PendingRequest::new(
            ticket,
            Box::pin(async move { gateway.submit_checkout(&batch).await }),
        )
    }

    /// Apply a finished request.
    ///
    /// Failures are returned as errors and never touch state. A successful
    /// response older than the last applied one is dropped as
    /// [`ApplyStatus::Stale`].
    pub fn complete(&mut self, done: CompletedRequest) -> ClientResult<ApplyStatus> {
        let CompletedRequest { ticket, result } = done;
        let items = match result {
            Ok(items) => items,
            Err(err) => {
                warn!("[Catalog] Request #{} failed: {}", ticket.seq(), err);
                return Err(err.into());
            }
        };

        if ticket.seq() <= self.last_applied {
            debug!(
                "[Catalog] Dropping stale response #{} (applied #{})",
                ticket.seq(),
                self.last_applied
            );
            return Ok(ApplyStatus::Stale);
        }
        self.last_applied = ticket.seq();

        let kind = match ticket.kind {
            RequestKind::FullListing => SnapshotKind::FullListing,
            RequestKind::Search { query } => SnapshotKind::Search { query },
            RequestKind::Checkout { .. } => SnapshotKind::Checkout,
        };
        info!("[Catalog] Applied {:?} with {} items", kind, items.len());

        let snapshot = CatalogSnapshot { kind, items };
        if snapshot.kind.is_full_listing() {
            self.selection.reset(snapshot.items.iter().map(MediaItem::id));
            self.listing = Some(snapshot);
            // Results fetched before this listing may describe old renters.
            self.search_results = None;
            self.view = CatalogView::Listing;
        } else {
            self.search_results = Some(snapshot);
            self.view = CatalogView::Search;
        }
        Ok(ApplyStatus::Applied)
    }

    /// Fetch and apply the full listing.
    pub async fn load_all(&mut self) -> ClientResult<ApplyStatus> {
        let done = self.begin_load_all().resolve().await;
        self.complete(done)
    }

    /// Fetch and apply search results for `text`.
    pub async fn search(&mut self, text: &str) -> ClientResult<ApplyStatus> {
        let done = self.begin_search(text).resolve().await;
        self.complete(done)
    }

    /// Apply the toggle rule for `key` and return the resulting spec.
    pub fn set_sort(&mut self, key: SortKey) -> SortSpec {
        let spec = SortSpec::next(self.sort, key);
        self.sort = Some(spec);
        spec
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Switch the displayed snapshot. Selection is unaffected.
    pub fn show(&mut self, view: CatalogView) {
        self.view = view;
    }

    pub fn view(&self) -> CatalogView {
        self.view
    }

    /// Flip the checked state of `id` in the full listing and return the
    /// new flag. Works from either view.
    pub fn toggle_select(&mut self, id: MediaId) -> ClientResult<bool> {
        if !self.selection.contains(id) {
            return Err(ClientError::NotInListing(id));
        }
        match self.listing_item(id) {
            Some(item) if item.borrowable() => {}
            _ => return Err(ClientError::NotSelectable(id)),
        }
        self.selection
            .toggle(id)
            .ok_or(ClientError::NotInListing(id))
    }

    /// Displayed items in sort order, fetch order when no sort is active.
    /// Ties keep their fetch order.
    pub fn sorted_view(&self) -> Vec<&MediaItem> {
        let mut view: Vec<&MediaItem> = self.items().iter().collect();
        if let Some(spec) = self.sort {
            view.sort_by(|a, b| spec.compare(a, b));
        }
        view
    }

    /// The snapshot on display
    pub fn snapshot(&self) -> Option<&CatalogSnapshot> {
        match self.view {
            CatalogView::Listing => self.listing.as_ref(),
            CatalogView::Search => self.search_results.as_ref().or(self.listing.as_ref()),
        }
    }

    /// Displayed items in fetch order
    pub fn items(&self) -> &[MediaItem] {
        snapshot_items(self.snapshot())
    }

    pub fn listing(&self) -> Option<&CatalogSnapshot> {
        self.listing.as_ref()
    }

    /// Items of the latest full listing, in fetch order
    pub fn listing_items(&self) -> &[MediaItem] {
        snapshot_items(self.listing.as_ref())
    }

    pub fn search_results(&self) -> Option<&CatalogSnapshot> {
        self.search_results.as_ref()
    }

    /// Look `id` up on display first, then in the full listing.
    pub fn item(&self, id: MediaId) -> Option<&MediaItem> {
        self.items()
            .iter()
            .find(|item| item.id() == id)
            .or_else(|| self.listing_item(id))
    }

    fn listing_item(&self, id: MediaId) -> Option<&MediaItem> {
        self.listing_items().iter().find(|item| item.id() == id)
    }

    /// Query of the search results on display, `None` for a full listing.
    pub fn filter_text(&self) -> Option<&str> {
        match self.snapshot().map(|snapshot| &snapshot.kind) {
            Some(SnapshotKind::Search { query }) => Some(query.as_str()),
            _ => None,
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, id: MediaId) -> bool {
        self.selection.is_selected(id)
    }

    /// Selected ids in listing order
    pub fn selected_ids(&self) -> Vec<MediaId> {
        self.listing_items()
            .iter()
            .map(MediaItem::id)
            .filter(|id| self.selection.is_selected(*id))
            .collect()
    }

    /// Checked items of the full listing, in fetch order.
    pub fn checkout_batch(&self) -> Vec<MediaItem> {
        self.listing_items()
            .iter()
            .filter(|item| self.selection.is_selected(item.id()))
            .cloned()
            .collect()
    }

    /// Drop all catalog state. Requests still in flight become stale.
    pub fn clear(&mut self) {
        self.listing = None;
        self.search_results = None;
        self.view = CatalogView::default();
        self.sort = None;
        self.selection.clear();
        self.last_applied = self.next_seq;
    }
}

fn snapshot_items(snapshot: Option<&CatalogSnapshot>) -> &[MediaItem] {
    snapshot
        .map(|snapshot| snapshot.items.as_slice())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::services::commands;
    use crate::infrastructure::testing::TestCatalogGateway;
    use crate::infrastructure::testing::fixtures::sample_catalog;

    fn view_model() -> (CatalogViewModel, TestCatalogGateway) {
        let gateway = TestCatalogGateway::default();
        (CatalogViewModel::new(Arc::new(gateway.clone())), gateway)
    }

    #[tokio::test]
    async fn failed_load_leaves_state_untouched() {
        let (mut vm, gateway) = view_model();
        vm.load_all().await.unwrap();
        vm.toggle_select(MediaId(1001)).unwrap();

        gateway.fail_next(commands::GET_MEDIA, "down");
        assert!(vm.load_all().await.is_err());
        assert_eq!(vm.items().len(), sample_catalog().len());
        assert_eq!(vm.selected_ids(), [MediaId(1001)]);
    }

    #[tokio::test]
    async fn search_keeps_selection_and_records_query() {
        let (mut vm, _) = view_model();
        vm.load_all().await.unwrap();
        vm.toggle_select(MediaId(1001)).unwrap();

        vm.search("blade").await.unwrap();
        assert_eq!(vm.filter_text(), Some("blade"));
        assert_eq!(vm.view(), CatalogView::Search);
        assert_eq!(vm.items().len(), 1);
        assert_eq!(vm.selection().len(), sample_catalog().len());
        assert_eq!(vm.selected_ids(), [MediaId(1001)]);

        // Items outside the results stay selectable through the listing.
        assert!(!vm.toggle_select(MediaId(1001)).unwrap());
        assert!(vm.toggle_select(MediaId(1007)).unwrap());
        assert_eq!(vm.selected_ids(), [MediaId(1007)]);

        vm.show(CatalogView::Listing);
        assert_eq!(vm.filter_text(), None);
        assert_eq!(vm.items().len(), sample_catalog().len());

        vm.load_all().await.unwrap();
        assert!(vm.search_results().is_none());
        assert!(vm.selected_ids().is_empty());
    }

    #[tokio::test]
    async fn search_view_falls_back_to_listing() {
        let (mut vm, _) = view_model();
        vm.load_all().await.unwrap();
        vm.show(CatalogView::Search);
        assert_eq!(vm.items().len(), sample_catalog().len());
        assert_eq!(vm.filter_text(), None);
    }

    #[tokio::test]
    async fn clear_makes_in_flight_requests_stale() {
        let (mut vm, _) = view_model();
        let pending = vm.begin_load_all();
        vm.clear();
        let status = vm.complete(pending.resolve().await).unwrap();
        assert_eq!(status, ApplyStatus::Stale);
        assert!(vm.items().is_empty());
    }
}
