//! Libris circulation client.
//!
//! Domains hold the session state machines and the catalog view-model; the
//! infrastructure layer owns the wire contract with the circulation service;
//! `app` composes both behind a terminal shell.

pub mod app;
pub mod domains;
pub mod error;
pub mod infrastructure;

pub use app::{AppConfig, AppState};
pub use error::{ClientError, ClientResult};
