pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod navigation;
