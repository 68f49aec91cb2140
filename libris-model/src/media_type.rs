use std::fmt::Display;
use std::fmt::Formatter;

/// Kind of catalog item as labelled by the circulation service.
///
/// Known labels map to dedicated variants; anything else is carried through
/// untouched in [`MediaType::Other`] so a newer service never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum MediaType {
    Book,
    VideoGame,
    Movie,
    Music,
    #[default]
    None,
    Other(String),
}

impl MediaType {
    /// Label exactly as it appears on the wire.
    pub fn as_label(&self) -> &str {
        match self {
            MediaType::Book => "Book",
            MediaType::VideoGame => "VideoGame",
            MediaType::Movie => "Movie",
            MediaType::Music => "Music",
            MediaType::None => "None",
            MediaType::Other(label) => label.as_str(),
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "Book" => MediaType::Book,
            "VideoGame" => MediaType::VideoGame,
            "Movie" => MediaType::Movie,
            "Music" => MediaType::Music,
            "None" => MediaType::None,
            other => MediaType::Other(other.to_string()),
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Book => write!(f, "Book"),
            MediaType::VideoGame => write!(f, "Video Game"),
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Music => write!(f, "Music"),
            MediaType::None => write!(f, "None"),
            MediaType::Other(label) => write!(f, "{label}"),
        }
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match MediaType::from_label(&value) {
            MediaType::Other(_) => MediaType::Other(value),
            known => known,
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        match value {
            MediaType::Other(label) => label,
            known => known.as_label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_round_trip_through_wire_form() {
        for label in ["Book", "VideoGame", "Movie", "Music", "None"] {
            assert_eq!(MediaType::from_label(label).as_label(), label);
        }
    }

    #[test]
    fn unknown_labels_are_preserved() {
        let kind = MediaType::from(String::from("Magazine"));
        assert_eq!(kind, MediaType::Other("Magazine".into()));
        assert_eq!(String::from(kind), "Magazine");
    }

    #[test]
    fn display_uses_human_labels() {
        assert_eq!(MediaType::VideoGame.to_string(), "Video Game");
    }
}
