use std::fmt;

use serde::{Deserialize, Serialize};

/// Markdown heading level, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN && level <= Self::MAX { Some(Self(level)) } else { None }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// All six levels in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("heading level {value} is outside 1..=6"))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// A heading found by scanning body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    /// Trailing content with surrounding whitespace trimmed.
    pub text: String,
    /// 1-based line number within the scanned text.
    pub line_number: usize,
}

/// Heading position as supplied by a host metadata index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingPosition {
    pub level: HeadingLevel,
    /// 0-based line within the whole document (front matter included).
    pub start_line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_levels_outside_range() {
        assert!(HeadingLevel::new(0).is_none());
        assert!(HeadingLevel::new(7).is_none());
        assert_eq!(HeadingLevel::new(3).map(HeadingLevel::get), Some(3));
    }

    #[test]
    fn all_yields_six_levels() {
        let levels: Vec<u8> = HeadingLevel::all().map(HeadingLevel::get).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<HeadingLevel>("7").is_err());
        assert_eq!(serde_json::from_str::<HeadingLevel>("2").unwrap().get(), 2);
    }
}
