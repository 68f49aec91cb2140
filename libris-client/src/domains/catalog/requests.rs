//! Sequencing of item-replacing requests
//!
//! Every full listing, search and checkout is issued as a [`PendingRequest`]
//! carrying a ticket with a monotonically increasing sequence number. The
//! view-model applies a completed request only if its number is newer than
//! the last one it applied, so a slow response can never overwrite a fresher
//! one.

use futures::future::BoxFuture;
use libris_model::MediaItem;

use crate::error::GatewayResult;

/// What an item-replacing request asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    FullListing,
    Search { query: String },
    Checkout { submitted: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub(crate) seq: u64,
    pub kind: RequestKind,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A request in flight. Awaiting it does not touch any view state.
pub struct PendingRequest {
    ticket: RequestTicket,
    future: BoxFuture<'static, GatewayResult<Vec<MediaItem>>>,
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequest")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

impl PendingRequest {
    pub(crate) fn new(
        ticket: RequestTicket,
        future: BoxFuture<'static, GatewayResult<Vec<MediaItem>>>,
    ) -> Self {
        Self { ticket, future }
    }

    pub fn ticket(&self) -> &RequestTicket {
        &self.ticket
    }

    pub async fn resolve(self) -> CompletedRequest {
        CompletedRequest {
            result: self.future.await,
            ticket: self.ticket,
        }
    }
}

/// A finished request waiting to be applied
#[derive(Debug)]
pub struct CompletedRequest {
    pub ticket: RequestTicket,
    pub result: GatewayResult<Vec<MediaItem>>,
}

/// Whether a successful response replaced the view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    Applied,
    /// A newer request was applied first; the response was dropped.
    Stale,
}
