//! Catalog view-model behaviour: loading, selection and sorting

mod common;

use common::{demo_gateway, gateway_with, ids, item, view_model};
use libris_client::ClientError;
use libris_client::domains::catalog::{ApplyStatus, SortDirection, SortKey};
use libris_model::{MediaId, MediaItem, MediaType};

#[tokio::test]
async fn load_all_covers_every_item_unselected() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);

    assert_eq!(vm.load_all().await.unwrap(), ApplyStatus::Applied);

    let n = gateway.media().len();
    assert_eq!(vm.items().len(), n);
    assert_eq!(vm.selection().len(), n);
    assert_eq!(vm.selection().selected_count(), 0);
}

#[tokio::test]
async fn reload_drops_previous_selection() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();
    vm.toggle_select(MediaId(1001)).unwrap();
    vm.toggle_select(MediaId(1003)).unwrap();

    gateway.set_media(vec![item(1001, "Dune", true), item(2000, "New", true)]);
    vm.load_all().await.unwrap();

    assert_eq!(vm.selection().len(), 2);
    assert!(vm.selected_ids().is_empty());
    assert!(vm.checkout_batch().is_empty());
}

#[tokio::test]
async fn search_leaves_selection_and_batch_alone() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();
    let n = vm.listing_items().len();
    assert_eq!(n, 8);

    vm.toggle_select(MediaId(1001)).unwrap();
    let batch = vm.checkout_batch();

    assert_eq!(vm.search("dr").await.unwrap(), ApplyStatus::Applied);
    assert_eq!(vm.filter_text(), Some("dr"));
    assert_eq!(vm.selection().len(), n);
    assert_eq!(vm.checkout_batch(), batch);
    assert_eq!(vm.listing_items().len(), n);
}

#[tokio::test]
async fn non_borrowable_toggle_is_rejected_without_change() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();
    let before = vm.selection().clone();

    let err = vm.toggle_select(MediaId(1002)).unwrap_err();
    assert!(matches!(err, ClientError::NotSelectable(MediaId(1002))));
    assert_eq!(vm.selection(), &before);
}

#[tokio::test]
async fn unknown_id_is_rejected() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    let err = vm.toggle_select(MediaId(9999)).unwrap_err();
    assert!(matches!(err, ClientError::NotInListing(MediaId(9999))));
}

#[tokio::test]
async fn batch_is_subset_and_double_toggle_restores_it() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    vm.toggle_select(MediaId(1003)).unwrap();
    let before = vm.checkout_batch();

    assert!(vm.toggle_select(MediaId(1005)).unwrap());
    assert!(!vm.toggle_select(MediaId(1005)).unwrap());
    assert_eq!(vm.checkout_batch(), before);

    vm.toggle_select(MediaId(1001)).unwrap();
    let batch = vm.checkout_batch();
    assert!(batch.iter().all(|picked| vm.items().contains(picked)));
    // listing order, not click order
    let batch_ids: Vec<_> = batch.iter().map(MediaItem::id).collect();
    assert_eq!(batch_ids, [MediaId(1001), MediaId(1003)]);
}

#[tokio::test]
async fn sort_toggle_rules() {
    let gateway = demo_gateway();
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    assert_eq!(vm.set_sort(SortKey::Name).direction, SortDirection::Ascending);
    assert_eq!(vm.set_sort(SortKey::Name).direction, SortDirection::Descending);

    let spec = vm.set_sort(SortKey::Vendor);
    assert_eq!(spec.key, SortKey::Vendor);
    assert_eq!(spec.direction, SortDirection::Ascending);
}

#[tokio::test]
async fn unsorted_view_keeps_fetch_order() {
    let gateway = gateway_with(vec![
        item(3, "C", true),
        item(1, "A", true),
        item(2, "B", true),
    ]);
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    assert_eq!(ids(&vm.sorted_view()), [3, 1, 2]);
    vm.set_sort(SortKey::Id);
    assert_eq!(ids(&vm.sorted_view()), [1, 2, 3]);
    vm.set_sort(SortKey::Id);
    assert_eq!(ids(&vm.sorted_view()), [3, 2, 1]);
}

#[tokio::test]
async fn sorting_is_stable_in_both_directions() {
    let gateway = gateway_with(vec![
        item(10, "Same", true),
        item(11, "Other", false),
        item(12, "Same", false),
        item(13, "Same", true),
    ]);
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    vm.set_sort(SortKey::Name);
    assert_eq!(ids(&vm.sorted_view()), [11, 10, 12, 13]);
    vm.set_sort(SortKey::Name);
    assert_eq!(ids(&vm.sorted_view()), [10, 12, 13, 11]);

    // false < true, ties keep fetch order
    vm.set_sort(SortKey::Borrowable);
    assert_eq!(ids(&vm.sorted_view()), [11, 12, 10, 13]);
}

#[tokio::test]
async fn ids_sort_numerically_not_as_text() {
    let gateway = gateway_with(vec![item(100, "x", true), item(9, "y", true)]);
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    vm.set_sort(SortKey::Id);
    assert_eq!(ids(&vm.sorted_view()), [9, 100]);
}

#[tokio::test]
async fn media_type_sorts_by_label() {
    let games = MediaItem::new(MediaId(1), MediaType::VideoGame, "g", true, "v", "");
    let music = MediaItem::new(MediaId(2), MediaType::Music, "m", true, "v", "");
    let book = MediaItem::new(MediaId(3), MediaType::Book, "b", true, "v", "");
    let gateway = gateway_with(vec![games, music, book]);
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    vm.set_sort(SortKey::MediaType);
    assert_eq!(ids(&vm.sorted_view()), [3, 2, 1]);
}

#[tokio::test]
async fn two_item_scenario() {
    let gateway = gateway_with(vec![item(1, "B", true), item(2, "A", false)]);
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();

    vm.set_sort(SortKey::Name);
    assert_eq!(ids(&vm.sorted_view()), [2, 1]);

    assert!(vm.toggle_select(MediaId(2)).is_err());
    assert!(vm.checkout_batch().is_empty());

    vm.toggle_select(MediaId(1)).unwrap();
    assert_eq!(vm.checkout_batch(), [item(1, "B", true)]);
}

#[tokio::test]
async fn sort_survives_reload() {
    let gateway = gateway_with(vec![item(1, "B", true), item(2, "A", true)]);
    let mut vm = view_model(&gateway);
    vm.load_all().await.unwrap();
    vm.set_sort(SortKey::Name);

    gateway.set_media(vec![item(3, "C", true), item(4, "0", true)]);
    vm.load_all().await.unwrap();
    assert_eq!(ids(&vm.sorted_view()), [4, 3]);
}
