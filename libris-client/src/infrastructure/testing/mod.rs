//! In-process test doubles
//!
//! The stub gateway doubles as the offline/demo backend, so this module is
//! compiled into the binary rather than gated on `cfg(test)`.

pub mod fixtures;
pub mod stubs;

pub use fixtures::{DemoAccount, sample_accounts, sample_catalog};
pub use stubs::TestCatalogGateway;
