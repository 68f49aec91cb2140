//! Out-of-order completion of item-replacing requests

mod common;

use common::{demo_gateway, view_model};
use libris_client::ClientError;
use libris_client::domains::catalog::{ApplyStatus, RequestKind, SnapshotKind};
use libris_client::infrastructure::services::commands;
use libris_model::MediaId;

#[tokio::test]
async fn older_search_cannot_overwrite_newer_results() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);

    let everything = vm.begin_search("");
    let narrowed = vm.begin_search("dr");
    assert!(narrowed.ticket().seq() > everything.ticket().seq());

    // "dr" completes first
    let narrowed = narrowed.resolve().await;
    let everything = everything.resolve().await;

    assert_eq!(vm.complete(narrowed).unwrap(), ApplyStatus::Applied);
    assert_eq!(vm.complete(everything).unwrap(), ApplyStatus::Stale);

    assert_eq!(vm.filter_text(), Some("dr"));
    let names: Vec<_> = vm.items().iter().map(|item| item.name()).collect();
    assert_eq!(names, ["Dracula"]);
}

#[tokio::test]
async fn in_order_completion_applies_both() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);

    let first = vm.begin_search("dune");
    let second = vm.begin_load_all();

    let first = first.resolve().await;
    assert_eq!(vm.complete(first).unwrap(), ApplyStatus::Applied);
    let second = second.resolve().await;
    assert_eq!(vm.complete(second).unwrap(), ApplyStatus::Applied);

    assert_eq!(
        vm.snapshot().map(|snapshot| &snapshot.kind),
        Some(&SnapshotKind::FullListing)
    );
    assert_eq!(vm.filter_text(), None);
}

#[tokio::test]
async fn late_listing_does_not_reset_newer_search() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();
    vm.toggle_select(MediaId(1001)).unwrap();

    let listing = vm.begin_load_all();
    let search = vm.begin_search("alien");
    assert_eq!(
        search.ticket().kind,
        RequestKind::Search {
            query: "alien".into()
        }
    );

    let search = search.resolve().await;
    vm.complete(search).unwrap();
    let listing = listing.resolve().await;
    assert_eq!(vm.complete(listing).unwrap(), ApplyStatus::Stale);

    assert_eq!(vm.items().len(), 1);
    assert_eq!(vm.selection().len(), gateway.media().len());
    assert_eq!(vm.selected_ids(), [MediaId(1001)]);
}

#[tokio::test]
async fn failures_surface_and_keep_state() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    gateway.fail_next(commands::SEARCH_MEDIA, "connection reset");
    let err = vm.search("dune").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(vm.filter_text(), None);
    assert_eq!(vm.items().len(), gateway.media().len());
}
