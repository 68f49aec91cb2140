//! Catalog browsing: fetched items, sorting, selection and request ordering

pub mod requests;
pub mod selection;
pub mod types;
pub mod view_model;

pub use requests::{ApplyStatus, CompletedRequest, PendingRequest, RequestKind, RequestTicket};
pub use selection::SelectionSet;
pub use types::{CatalogSnapshot, CatalogView, SnapshotKind, SortDirection, SortKey, SortSpec};
pub use view_model::CatalogViewModel;
