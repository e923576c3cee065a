//! User-defined counter configurations.
//!
//! A [`CounterConfig`] is only obtainable from a [`CounterDraft`] that passed
//! validation, or by deserialising a settings file (which [`CounterSet`]
//! re-validates as a whole).

pub mod counter_set;
pub mod validator;

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::counter::CounterType;

pub use counter_set::CounterSet;
pub use validator::{ConfigValidator, ValidationError};

/// Opaque, stable counter identifier; generated once and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterId(String);

impl CounterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// ミリ秒タイムスタンプ + プロセス内連番
    pub fn generate() -> Self {
        static SEQUENCE: AtomicU64 = AtomicU64::new(0);
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}-{seq}", Utc::now().timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counter parameter as entered by the user: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CounterParameter {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CounterParameter {
    /// Coerce to an integer: whole floats and numeric strings convert, anything else does not.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                #[allow(clippy::cast_possible_truncation)]
                Some(*value as i64)
            }
            Self::Float(_) => None,
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for CounterParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

/// One validated mapping from a counter type to an output property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    id: CounterId,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    counter_type: CounterType,
    property: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameter: Option<CounterParameter>,
}

impl CounterConfig {
    pub fn id(&self) -> &CounterId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counter_type(&self) -> CounterType {
        self.counter_type
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn parameter(&self) -> Option<&CounterParameter> {
        self.parameter.as_ref()
    }

    /// Editable copy carrying this counter's id.
    pub fn to_draft(&self) -> CounterDraft {
        CounterDraft {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            counter_type: Some(self.counter_type),
            property: self.property.clone(),
            enabled: self.enabled,
            parameter: self.parameter.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(
        id: &str,
        counter_type: CounterType,
        property: &str,
        parameter: Option<CounterParameter>,
    ) -> Self {
        Self {
            id: CounterId::new(id),
            name: String::new(),
            counter_type,
            property: property.to_string(),
            enabled: true,
            parameter,
        }
    }
}

/// Possibly incomplete counter definition, as an editor holds it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterDraft {
    /// `None` for counters that have not been saved yet.
    pub id: Option<CounterId>,
    pub name: String,
    pub counter_type: Option<CounterType>,
    pub property: String,
    pub enabled: bool,
    pub parameter: Option<CounterParameter>,
}

impl CounterDraft {
    pub fn new(counter_type: CounterType, property: impl Into<String>) -> Self {
        Self {
            id: None,
            name: counter_type.descriptor().name.to_string(),
            counter_type: Some(counter_type),
            property: property.into(),
            enabled: true,
            parameter: None,
        }
    }

    pub fn with_parameter(mut self, parameter: CounterParameter) -> Self {
        self.parameter = Some(parameter);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Validate against `existing` and freeze into a config.
    ///
    /// The property is trimmed but otherwise kept as entered; a missing id is generated.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the draft violates.
    pub fn into_config(self, existing: &[CounterConfig]) -> Result<CounterConfig, ValidationError> {
        ConfigValidator::validate(&self, existing)?;
        let counter_type = self.counter_type.ok_or(ValidationError::TypeRequired)?;
        Ok(CounterConfig {
            id: self.id.unwrap_or_else(CounterId::generate),
            name: self.name,
            counter_type,
            property: self.property.trim().to_string(),
            enabled: self.enabled,
            parameter: self.parameter,
        })
    }
}
