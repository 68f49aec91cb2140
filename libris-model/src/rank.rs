use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Privilege level assigned to an authenticated account.
///
/// Variants are declared lowest to highest so the derived ordering is the
/// privilege ordering. The client only uses rank to decide which navigation
/// entries to show; the service remains the authority on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Rank {
    #[default]
    None,
    Basic,
    User,
    Manager,
    Admin,
    Dev,
}

impl Rank {
    /// Every rank, lowest privilege first.
    pub const ALL: [Rank; 6] = [
        Rank::None,
        Rank::Basic,
        Rank::User,
        Rank::Manager,
        Rank::Admin,
        Rank::Dev,
    ];

    /// Position in the privilege ordering, `None` is 0.
    pub const fn index(self) -> usize {
        match self {
            Rank::None => 0,
            Rank::Basic => 1,
            Rank::User => 2,
            Rank::Manager => 3,
            Rank::Admin => 4,
            Rank::Dev => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Rank::None => "None",
            Rank::Basic => "Basic",
            Rank::User => "User",
            Rank::Manager => "Manager",
            Rank::Admin => "Admin",
            Rank::Dev => "Dev",
        }
    }

    /// Parse a rank label, falling back to [`Rank::None`] for anything
    /// unrecognised.
    pub fn from_label_or_none(label: &str) -> Self {
        label.parse().unwrap_or(Rank::None)
    }
}

impl FromStr for Rank {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Rank::ALL
            .into_iter()
            .find(|rank| rank.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownRank(s.to_string()))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Rank {
    fn from(value: String) -> Self {
        Rank::from_label_or_none(&value)
    }
}

impl From<Rank> for String {
    fn from(value: Rank) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_declared_hierarchy() {
        for pair in Rank::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].index() + 1, pair[1].index());
        }
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("admin".parse::<Rank>(), Ok(Rank::Admin));
        assert_eq!(" Dev ".parse::<Rank>(), Ok(Rank::Dev));
    }

    #[test]
    fn unknown_labels_fall_back_to_none() {
        assert!("Superuser".parse::<Rank>().is_err());
        assert_eq!(Rank::from_label_or_none("Superuser"), Rank::None);
        assert_eq!(Rank::from_label_or_none(""), Rank::None);
    }
}
