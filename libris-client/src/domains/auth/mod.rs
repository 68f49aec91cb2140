//! Sign-in, rank resolution and role-based visibility

pub mod permissions;
pub mod session;
pub mod state_types;
pub mod types;

pub use permissions::{
    PermissionChecker, VisibilityFlags, has_at_least, visibility_for,
    visibility_for_label,
};
pub use session::{AuthSession, LoginAttempt, PendingRank, RankUpdate, ResolvedRank};
pub use state_types::AuthState;
pub use types::UserId;
