//! Frequently used model types for UI and orchestration crates.

pub use crate::error::{ModelError, Result as ModelResult};
pub use crate::ids::MediaId;
pub use crate::media::MediaItem;
pub use crate::media_type::MediaType;
pub use crate::rank::Rank;
