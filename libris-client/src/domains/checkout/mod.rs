//! Checkout of the current selection

pub mod session;

pub use session::{CheckoutReceipt, CheckoutSession};
