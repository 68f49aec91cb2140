//! Shared helpers for client integration tests

#![allow(dead_code)]

use std::sync::Arc;

use libris_client::domains::catalog::CatalogViewModel;
use libris_client::infrastructure::testing::{
    TestCatalogGateway, sample_accounts, sample_catalog,
};
use libris_model::{MediaId, MediaItem, MediaType};

pub fn item(id: u32, name: &str, borrowable: bool) -> MediaItem {
    MediaItem::new(MediaId(id), MediaType::Book, name, borrowable, "Vendor", "")
}

pub fn gateway_with(media: Vec<MediaItem>) -> TestCatalogGateway {
    TestCatalogGateway::new(sample_accounts(), media)
}

pub fn demo_gateway() -> TestCatalogGateway {
    gateway_with(sample_catalog())
}

pub fn view_model(gateway: &TestCatalogGateway) -> CatalogViewModel {
    CatalogViewModel::new(Arc::new(gateway.clone()))
}

pub fn ids(items: &[&MediaItem]) -> Vec<u32> {
    items.iter().map(|item| item.id().get()).collect()
}
