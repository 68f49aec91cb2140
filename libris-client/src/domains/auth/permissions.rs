//! Permission helpers for role-gated navigation
//!
//! The client mirrors the service's rank hierarchy for display only. Every
//! check here fails closed: no rank, or a label the client does not know,
//! behaves like [`Rank::None`].

use libris_model::Rank;

/// Which dashboard actions are shown for a rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityFlags {
    pub media_button: bool,
    pub employees_button: bool,
    pub settings_button: bool,
}

impl VisibilityFlags {
    pub const HIDDEN: VisibilityFlags = VisibilityFlags {
        media_button: false,
        employees_button: false,
        settings_button: false,
    };
}

/// Exhaustive rank to visibility table.
pub const fn visibility_for(rank: Rank) -> VisibilityFlags {
    let (media_button, employees_button, settings_button) = match rank {
        Rank::None => (false, false, false),
        Rank::Basic | Rank::User => (true, false, false),
        Rank::Manager => (true, true, false),
        Rank::Admin | Rank::Dev => (true, true, true),
    };
    VisibilityFlags {
        media_button,
        employees_button,
        settings_button,
    }
}

/// Visibility for a raw rank label as received from the service.
pub fn visibility_for_label(label: &str) -> VisibilityFlags {
    visibility_for(Rank::from_label_or_none(label))
}

/// `rank` sits at or above `required` in the hierarchy.
pub const fn has_at_least(rank: Rank, required: Rank) -> bool {
    rank.index() >= required.index()
}

/// Permission checker for the current session
#[derive(Debug, Clone, Copy)]
pub struct PermissionChecker {
    rank: Option<Rank>,
}

impl PermissionChecker {
    /// `None` means no rank is known yet (signed out or still resolving).
    pub fn new(rank: Option<Rank>) -> Self {
        Self { rank }
    }

    pub fn rank(&self) -> Rank {
        self.rank.unwrap_or_default()
    }

    pub fn has_at_least(&self, required: Rank) -> bool {
        has_at_least(self.rank(), required)
    }

    pub fn visibility(&self) -> VisibilityFlags {
        visibility_for(self.rank())
    }

    pub fn can_browse_media(&self) -> bool {
        self.visibility().media_button
    }

    pub fn can_view_employees(&self) -> bool {
        self.visibility().employees_button
    }

    pub fn can_access_settings(&self) -> bool {
        self.visibility().settings_button
    }
}
