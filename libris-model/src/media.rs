use std::fmt;

use crate::ids::MediaId;
use crate::media_type::MediaType;

/// A single catalog record as reported by the circulation service.
///
/// Items are immutable once fetched. A refetch replaces them wholesale, so
/// there are no setters; [`MediaItem::rented_by`] builds a new value for
/// stubs that simulate the service side of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields)
)]
pub struct MediaItem {
    id: MediaId,
    media_type: MediaType,
    name: String,
    borrowable: bool,
    vendor: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "renter_or_empty"))]
    renter: String,
}

impl MediaItem {
    pub fn new(
        id: MediaId,
        media_type: MediaType,
        name: impl Into<String>,
        borrowable: bool,
        vendor: impl Into<String>,
        renter: impl Into<String>,
    ) -> Self {
        Self {
            id,
            media_type,
            name: name.into(),
            borrowable,
            vendor: vendor.into(),
            renter: renter.into(),
        }
    }

    pub fn id(&self) -> MediaId {
        self.id
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn borrowable(&self) -> bool {
        self.borrowable
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn renter(&self) -> &str {
        &self.renter
    }

    /// Whether someone currently holds this item. An empty renter is the
    /// service's "not rented" sentinel.
    pub fn is_rented(&self) -> bool {
        !self.renter.trim().is_empty()
    }

    /// Copy of this item as it looks after `renter` checked it out.
    pub fn rented_by(&self, renter: impl Into<String>) -> Self {
        Self {
            borrowable: false,
            renter: renter.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Media Information:\n\
             ID: {}\n\
             Media Type: {}\n\
             Name: {}\n\
             Borrowable: {}\n\
             Vendor: {}\n\
             Renter: {}",
            self.id,
            self.media_type,
            self.name,
            if self.borrowable { "Yes" } else { "No" },
            self.vendor,
            if self.is_rented() { self.renter.as_str() } else { "-" }
        )
    }
}

#[cfg(feature = "serde")]
fn renter_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
