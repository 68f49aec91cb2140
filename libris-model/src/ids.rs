use crate::error::ModelError;
use std::str::FromStr;

/// Strongly typed identifier for catalog items.
///
/// Ids are assigned by the circulation service and are stable across
/// fetches, so they key selection state on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MediaId(pub u32);

impl MediaId {
    pub const fn new(raw: u32) -> Self {
        MediaId(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for MediaId {
    fn from(value: u32) -> Self {
        MediaId(value)
    }
}

impl FromStr for MediaId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(MediaId)
            .map_err(|_| ModelError::InvalidMediaId(s.to_string()))
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numeric_ids() {
        assert_eq!(" 42 ".parse::<MediaId>(), Ok(MediaId(42)));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert_eq!(
            "4x".parse::<MediaId>(),
            Err(ModelError::InvalidMediaId("4x".into()))
        );
        assert!("-1".parse::<MediaId>().is_err());
    }
}
