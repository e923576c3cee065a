use serde::{Deserialize, Serialize};

use super::{CounterConfig, CounterDraft, CounterId, ValidationError};

/// Immutable snapshot of every configured counter.
///
/// Edits never mutate a snapshot in place: each operation returns a new set,
/// so a calculation holding the previous snapshot keeps a consistent view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CounterConfig>", into = "Vec<CounterConfig>")]
pub struct CounterSet {
    configs: Vec<CounterConfig>,
}

impl CounterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-validate a loaded collection counter by counter, in order.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, including repeated ids.
    pub fn from_configs(configs: Vec<CounterConfig>) -> Result<Self, ValidationError> {
        let mut accepted: Vec<CounterConfig> = Vec::with_capacity(configs.len());
        for config in configs {
            if accepted.iter().any(|other| other.id() == config.id()) {
                return Err(ValidationError::DuplicateId(config.id().to_string()));
            }
            let validated = config.to_draft().into_config(&accepted)?;
            accepted.push(validated);
        }
        Ok(Self { configs: accepted })
    }

    /// # Errors
    ///
    /// Returns the validation error for `draft`.
    pub fn add(&self, draft: CounterDraft) -> Result<Self, ValidationError> {
        let config = draft.into_config(&self.configs)?;
        let mut configs = self.configs.clone();
        configs.push(config);
        Ok(Self { configs })
    }

    /// Replace the counter `id` with `draft`; the id itself never changes.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids and invalid drafts.
    pub fn update(&self, id: &CounterId, mut draft: CounterDraft) -> Result<Self, ValidationError> {
        let position = self.position(id)?;
        draft.id = Some(id.clone());
        let config = draft.into_config(&self.configs)?;
        let mut configs = self.configs.clone();
        configs[position] = config;
        Ok(Self { configs })
    }

    /// # Errors
    ///
    /// Fails for unknown ids.
    pub fn set_enabled(&self, id: &CounterId, enabled: bool) -> Result<Self, ValidationError> {
        let position = self.position(id)?;
        let mut draft = self.configs[position].to_draft();
        draft.enabled = enabled;
        self.update(id, draft)
    }

    /// Removing an unknown id is a no-op.
    pub fn remove(&self, id: &CounterId) -> Self {
        let configs = self.configs.iter().filter(|c| c.id() != id).cloned().collect();
        Self { configs }
    }

    pub fn get(&self, id: &CounterId) -> Option<&CounterConfig> {
        self.configs.iter().find(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CounterConfig> {
        self.configs.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &CounterConfig> {
        self.configs.iter().filter(|c| c.is_enabled())
    }

    /// Owned copy of the enabled counters, in configured order.
    pub fn enabled_snapshot(&self) -> Vec<CounterConfig> {
        self.enabled().cloned().collect()
    }

    pub fn as_slice(&self) -> &[CounterConfig] {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    fn position(&self, id: &CounterId) -> Result<usize, ValidationError> {
        self.configs
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| ValidationError::UnknownCounter(id.to_string()))
    }
}

impl TryFrom<Vec<CounterConfig>> for CounterSet {
    type Error = ValidationError;

    fn try_from(configs: Vec<CounterConfig>) -> Result<Self, Self::Error> {
        Self::from_configs(configs)
    }
}

impl From<CounterSet> for Vec<CounterConfig> {
    fn from(set: CounterSet) -> Self {
        set.configs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CounterParameter, counter::CounterType};

    fn base() -> CounterSet {
        CounterSet::new()
            .add(CounterDraft::new(CounterType::WordCount, "words"))
            .unwrap()
            .add(CounterDraft::new(CounterType::LineCount, "lines").disabled())
            .unwrap()
    }

    #[test]
    fn add_returns_new_snapshot() {
        let original = base();
        let next = original.add(CounterDraft::new(CounterType::HeadingCount, "headings")).unwrap();
        assert_eq!(original.len(), 2);
        assert_eq!(next.len(), 3);
    }

    #[test]
    fn add_rejects_duplicate_property() {
        let err = base().add(CounterDraft::new(CounterType::LineCount, "words")).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateProperty("words".into()));
    }

    #[test]
    fn update_keeps_id_and_may_change_everything_else() {
        let set = base();
        let id = set.as_slice()[0].id().clone();
        let draft = CounterDraft::new(CounterType::HeadingLevelCount, "h2")
            .with_parameter(CounterParameter::Integer(2));
        let updated = set.update(&id, draft).unwrap();

        let config = updated.get(&id).unwrap();
        assert_eq!(config.counter_type(), CounterType::HeadingLevelCount);
        assert_eq!(config.property(), "h2");
        assert_eq!(set.get(&id).unwrap().property(), "words");
    }

    #[test]
    fn update_unknown_id_fails() {
        let err = base()
            .update(&CounterId::new("missing"), CounterDraft::new(CounterType::WordCount, "x"))
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownCounter("missing".into()));
    }

    #[test]
    fn enabled_filters_disabled_counters() {
        let set = base();
        let enabled: Vec<_> = set.enabled().map(CounterConfig::property).collect();
        assert_eq!(enabled, vec!["words"]);

        let id = set.as_slice()[1].id().clone();
        let toggled = set.set_enabled(&id, true).unwrap();
        assert_eq!(toggled.enabled().count(), 2);
    }

    #[test]
    fn remove_drops_counter() {
        let set = base();
        let id = set.as_slice()[0].id().clone();
        let removed = set.remove(&id);
        assert_eq!(removed.len(), 1);
        assert!(removed.get(&id).is_none());
    }

    #[test]
    fn deserialization_validates_collection() {
        let json = r#"[
            {"id": "a", "type": "word-count", "property": "count"},
            {"id": "b", "type": "line-count", "property": "count"}
        ]"#;
        let err = serde_json::from_str::<CounterSet>(json).unwrap_err();
        assert!(err.to_string().contains("already used"));
    }

    #[test]
    fn deserialization_rejects_repeated_ids() {
        let json = r#"[
            {"id": "a", "type": "word-count", "property": "one"},
            {"id": "a", "type": "line-count", "property": "two"}
        ]"#;
        assert!(serde_json::from_str::<CounterSet>(json).is_err());
    }
}
