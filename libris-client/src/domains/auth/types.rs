use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Account id accepted by the sign-in form: a positive whole number no
/// larger than `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u32);

impl UserId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    /// Accepts only `[1-9][0-9]*`; signs, spaces and leading zeros are
    /// rejected. Well-formed ids past `u32::MAX` get their own error.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidUserId(raw.to_string());
        let mut chars = raw.chars();
        match chars.next() {
            Some('1'..='9') => {}
            _ => return Err(invalid()),
        }
        if !chars.all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        raw.parse::<u32>()
            .map(UserId)
            .map_err(|_| ValidationError::UserIdOutOfRange(raw.to_string()))
    }
}

impl TryFrom<&str> for UserId {
    type Error = ValidationError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl TryFrom<i64> for UserId {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw <= 0 {
            return Err(ValidationError::InvalidUserId(raw.to_string()));
        }
        u32::try_from(raw)
            .map(UserId)
            .map_err(|_| ValidationError::UserIdOutOfRange(raw.to_string()))
    }
}

impl TryFrom<u32> for UserId {
    type Error = ValidationError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        i64::from(raw).try_into()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
