use libris_model::{MediaId, MediaItem};
use log::{info, warn};

use crate::domains::catalog::{ApplyStatus, CatalogViewModel};
use crate::error::{ClientResult, ValidationError};

/// Record of the last accepted checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub submitted: Vec<MediaId>,
    /// Whether the returned listing replaced the catalog. A newer load that
    /// finished first makes this `Stale`; the checkout itself still went
    /// through.
    pub status: ApplyStatus,
}

/// Drives the checkout round trip for the catalog's current selection.
#[derive(Debug, Default)]
pub struct CheckoutSession {
    last_receipt: Option<CheckoutReceipt>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected items of the current full listing, in listing order.
    pub fn current_batch(&self, catalog: &CatalogViewModel) -> Vec<MediaItem> {
        catalog.checkout_batch()
    }

    /// Submit the current batch.
    ///
    /// An empty batch fails validation without contacting the service. On
    /// success the returned listing replaces the catalog and the selection
    /// resets; on failure both are left as they were.
    pub async fn submit(
        &mut self,
        catalog: &mut CatalogViewModel,
    ) -> ClientResult<CheckoutReceipt> {
        let batch = self.current_batch(catalog);
        if batch.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }
        let submitted: Vec<MediaId> = batch.iter().map(MediaItem::id).collect();

        let pending = catalog.begin_checkout(batch);
        let done = pending.resolve().await;
        let status = catalog.complete(done).inspect_err(|err| {
            warn!("[Checkout] Submitting {} items failed: {}", submitted.len(), err);
        })?;

        info!("[Checkout] Reserved {} items", submitted.len());
        let receipt = CheckoutReceipt { submitted, status };
        self.last_receipt = Some(receipt.clone());
        Ok(receipt)
    }

    pub fn last_receipt(&self) -> Option<&CheckoutReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn clear(&mut self) {
        self.last_receipt = None;
    }
}
