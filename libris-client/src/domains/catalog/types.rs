use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use libris_model::MediaItem;

/// Sortable media field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    MediaType,
    Name,
    Borrowable,
    Vendor,
    Renter,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Id,
        SortKey::MediaType,
        SortKey::Name,
        SortKey::Borrowable,
        SortKey::Vendor,
        SortKey::Renter,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::MediaType => "type",
            SortKey::Name => "name",
            SortKey::Borrowable => "borrowable",
            SortKey::Vendor => "vendor",
            SortKey::Renter => "renter",
        }
    }

    /// Ascending comparison on this field. Ids compare numerically, text
    /// lexicographically (media type by wire label), and `false < true`.
    pub fn compare(self, a: &MediaItem, b: &MediaItem) -> Ordering {
        match self {
            SortKey::Id => a.id().cmp(&b.id()),
            SortKey::MediaType => {
                a.media_type().as_label().cmp(b.media_type().as_label())
            }
            SortKey::Name => a.name().cmp(b.name()),
            SortKey::Borrowable => a.borrowable().cmp(&b.borrowable()),
            SortKey::Vendor => a.vendor().cmp(b.vendor()),
            SortKey::Renter => a.renter().cmp(b.renter()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = match wanted.as_str() {
            "media_type" | "mediatype" => "type",
            other => other,
        };
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| format!("unknown sort field: {s}"))
    }
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The single active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Selecting the active key flips its direction; any other key starts
    /// ascending.
    pub fn next(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.flipped(),
            },
            _ => SortSpec::ascending(key),
        }
    }

    pub fn compare(self, a: &MediaItem, b: &MediaItem) -> Ordering {
        match self.direction {
            SortDirection::Ascending => self.key.compare(a, b),
            SortDirection::Descending => self.key.compare(b, a),
        }
    }
}

/// What produced the items currently held
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotKind {
    FullListing,
    Search { query: String },
    /// Listing returned by a checkout; behaves as a full listing.
    Checkout,
}

impl SnapshotKind {
    pub fn is_full_listing(&self) -> bool {
        matches!(self, SnapshotKind::FullListing | SnapshotKind::Checkout)
    }
}

/// Which snapshot the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogView {
    #[default]
    Listing,
    /// Latest search results, or the listing while no search has applied.
    Search,
}

/// Items from one fetch, in service response order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub kind: SnapshotKind,
    pub items: Vec<MediaItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_toggles_new_key_resets() {
        let first = SortSpec::next(None, SortKey::Name);
        assert_eq!(first, SortSpec::ascending(SortKey::Name));

        let second = SortSpec::next(Some(first), SortKey::Name);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortSpec::next(Some(second), SortKey::Name);
        assert_eq!(third.direction, SortDirection::Ascending);

        let other = SortSpec::next(Some(second), SortKey::Vendor);
        assert_eq!(other, SortSpec::ascending(SortKey::Vendor));
    }

    #[test]
    fn parses_shell_field_names() {
        assert_eq!("Name".parse::<SortKey>(), Ok(SortKey::Name));
        assert_eq!("media_type".parse::<SortKey>(), Ok(SortKey::MediaType));
        assert!("year".parse::<SortKey>().is_err());
    }
}
