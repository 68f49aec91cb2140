//! Configuration library for the Libris client.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `LIBRIS_*` environment variables (a `.env` file in the working directory
//! is honoured). Command line flags are applied on top by the binary.

pub mod constants;
pub mod error;
pub mod loader;
pub mod models;
pub mod sources;
pub mod util;

pub use error::ConfigLoadError;
pub use loader::{ConfigLoad, ConfigLoader};
pub use models::{ClientConfig, ConfigMetadata, ConfigSource, ServerConfig};
pub use sources::{FileConfig, FileServerConfig};
