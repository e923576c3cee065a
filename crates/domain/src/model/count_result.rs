use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// Property name → value written during one calculation pass.
///
/// Entries keep counter order so reports read in the configured sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountResult {
    entries: Vec<(String, u64)>,
}

impl CountResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `property`, replacing an earlier entry with the same name.
    pub fn insert(&mut self, property: impl Into<String>, value: u64) {
        let property = property.into();
        match self.entries.iter_mut().find(|(name, _)| *name == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<u64> {
        self.entries.iter().find(|(name, _)| name == property).map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl Serialize for CountResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for CountResult {
    /// `word_count=120, h2=3`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
