// src/settings.rs
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use notestat_domain::{CounterDraft, CounterSet, CounterType};
use notestat_infra::persistence::{FileReader, FileWriter};
use notestat_shared_kernel::{ApplicationError, ErrorContext, Result};

pub const DEFAULT_FILE_NAME: &str = "notestat.yaml";
const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

fn default_counters() -> CounterSet {
    // 既定値は常に検証を通る
    CounterSet::new().add(CounterDraft::new(CounterType::WordCount, "word_count")).unwrap_or_default()
}

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub counters: CounterSet,
    /// Count words and characters on rendered text.
    pub rendered_text: bool,
    pub auto_calculate: bool,
    pub debounce_ms: u64,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            counters: default_counters(),
            rendered_text: false,
            auto_calculate: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// `explicit`, or `notestat.yaml` inside the vault.
    pub fn resolve_path(vault: &Path, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| vault.join(DEFAULT_FILE_NAME), Path::to_path_buf)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse settings text; counters are re-validated as a collection.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::SettingsInvalid` naming the first problem.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let parsed = match Format::of(path) {
            Format::Json => serde_json::from_str::<Self>(text).map_err(|err| err.to_string()),
            Format::Yaml if text.trim().is_empty() => Ok(Self::default()),
            Format::Yaml => serde_yaml::from_str::<Self>(text).map_err(|err| err.to_string()),
        };
        parsed.map_err(|reason| {
            ApplicationError::SettingsInvalid { reason: format!("{}: {reason}", path.display()) }.into()
        })
    }

    /// Load from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        match FileReader::read_optional(path)? {
            Some(text) => Self::parse(&text, path),
            None => {
                log::debug!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
        }
    }

    /// Serialise by extension and write atomically.
    ///
    /// # Errors
    ///
    /// Fails on serialisation or write errors.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = match Format::of(path) {
            Format::Json => serde_json::to_string_pretty(self)? + "\n",
            Format::Yaml => serde_yaml::to_string(self)?,
        };
        FileWriter::atomic_write(path, text.as_bytes())
            .with_context(|| format!("failed to save settings to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.counters.len(), 1);
        let counter = settings.counters.iter().next().unwrap();
        assert_eq!(counter.property(), "word_count");
        assert_eq!(counter.counter_type(), CounterType::WordCount);
        assert!(!settings.rendered_text);
        assert!(settings.auto_calculate);
        assert_eq!(settings.debounce(), Duration::from_millis(500));
        assert_eq!(LevelFilter::from(settings.log_level), LevelFilter::Warn);
    }

    #[test]
    fn parses_yaml_with_partial_fields() {
        let yaml = r"
counters:
  - id: a
    type: heading-level-count
    property: h2
    parameter: '2'
  - id: b
    type: line-count
    property: lines
    enabled: false
rendered_text: true
log_level: debug
";
        let settings = Settings::parse(yaml, Path::new("notestat.yaml")).unwrap();
        assert_eq!(settings.counters.len(), 2);
        assert_eq!(settings.counters.enabled().count(), 1);
        assert!(settings.rendered_text);
        assert_eq!(settings.debounce_ms, 500);
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn rejects_duplicate_properties() {
        let yaml = "counters:\n  - {id: a, type: word-count, property: x}\n  - {id: b, type: line-count, property: x}\n";
        let err = Settings::parse(yaml, Path::new("s.yml")).unwrap_err();
        assert!(err.to_string().contains("property 'x' is already used"));
    }

    #[test]
    fn rejects_out_of_range_parameter() {
        let json = r#"{"counters":[{"id":"a","type":"heading-level-count","property":"h","parameter":7}]}"#;
        let err = Settings::parse(json, Path::new("s.json")).unwrap_err();
        assert!(err.to_string().contains("between 1 and 6"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Settings::parse("colour: red\n", Path::new("s.yaml")).is_err());
    }

    #[test]
    fn missing_file_loads_defaults_and_save_round_trips() {
        let dir = tempdir().unwrap();
        let path = Settings::resolve_path(dir.path(), None);
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.counters.len(), 1);
        assert_eq!(loaded.debounce_ms, 500);

        let mut settings = loaded;
        settings.debounce_ms = 750;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);

        let json = dir.path().join("s.json");
        settings.save(&json).unwrap();
        assert_eq!(Settings::load(&json).unwrap(), settings);
    }
}
