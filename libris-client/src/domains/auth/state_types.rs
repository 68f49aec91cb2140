//! Authentication state machine
//!
//! `Anonymous -> Authenticating -> Authenticated -> Anonymous`, with
//! `Authenticating -> Anonymous` when the service rejects the credentials or
//! the call fails.

use libris_model::Rank;

use super::permissions::VisibilityFlags;
use super::types::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Nobody signed in
    #[default]
    Anonymous,

    /// Credentials sent, waiting for the verdict
    Authenticating { user_id: UserId },

    /// Signed in. `rank` stays `None` until the rank fetch resolves.
    Authenticated {
        user_id: UserId,
        rank: Option<Rank>,
        visibility: VisibilityFlags,
    },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticating { user_id }
            | AuthState::Authenticated { user_id, .. } => Some(*user_id),
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            AuthState::Authenticated { rank, .. } => *rank,
            _ => None,
        }
    }

    /// Hidden for every state except a signed-in session with a rank.
    pub fn visibility(&self) -> VisibilityFlags {
        match self {
            AuthState::Authenticated { visibility, .. } => *visibility,
            _ => VisibilityFlags::HIDDEN,
        }
    }
}
