//! Core data model definitions shared across Libris crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod media;
pub mod media_type;
pub mod prelude;
pub mod rank;

pub use error::{ModelError, Result as ModelResult};
pub use ids::MediaId;
pub use media::MediaItem;
pub use media_type::MediaType;
pub use rank::Rank;
