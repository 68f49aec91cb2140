pub mod bootstrap;
pub mod shell;
pub mod state;

pub use bootstrap::{AppConfig, base_state, build_gateway};
pub use shell::{Shell, ShellCommand, ShellOutcome};
pub use state::{AppState, DashboardTab};
