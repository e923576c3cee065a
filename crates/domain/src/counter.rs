//! Closed catalogue of counter types.
//!
//! Every [`CounterType`] maps to exactly one static [`CounterDescriptor`]
//! through an exhaustive `match`, so adding a variant without a descriptor
//! and projection fails to compile.

pub mod projection;
pub mod registry;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model::{FileStats, HeadingLevel};
use notestat_shared_kernel::DomainError;

pub use projection::project;
pub use registry::CounterRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterType {
    WordCount,
    CharCountWithSpaces,
    CharCountWithoutSpaces,
    LineCount,
    HeadingCount,
    HeadingLevelCount,
}

impl CounterType {
    pub const ALL: [Self; 6] = [
        Self::WordCount,
        Self::CharCountWithSpaces,
        Self::CharCountWithoutSpaces,
        Self::LineCount,
        Self::HeadingCount,
        Self::HeadingLevelCount,
    ];

    pub fn descriptor(self) -> &'static CounterDescriptor {
        match self {
            Self::WordCount => &registry::WORD_COUNT,
            Self::CharCountWithSpaces => &registry::CHAR_COUNT_WITH_SPACES,
            Self::CharCountWithoutSpaces => &registry::CHAR_COUNT_WITHOUT_SPACES,
            Self::LineCount => &registry::LINE_COUNT,
            Self::HeadingCount => &registry::HEADING_COUNT,
            Self::HeadingLevelCount => &registry::HEADING_LEVEL_COUNT,
        }
    }

    /// Kebab-case key used in settings files and on the command line.
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    pub fn has_parameter(self) -> bool {
        self.descriptor().parameter.is_some()
    }
}

impl fmt::Display for CounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CounterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CounterRegistry::find(s)
            .map(|descriptor| descriptor.counter_type)
            .ok_or_else(|| DomainError::UnknownCounterType { name: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Number,
    String,
}

/// Parameter metadata for counters that take one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub min: i64,
    pub max: i64,
}

impl ParameterSpec {
    pub const fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Projects base statistics to the scalar a counter writes.
///
/// The level argument is `Some` only for parameterised counters, after the
/// parameter has been resolved.
pub type Projection = fn(&FileStats, Option<HeadingLevel>) -> usize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CounterDescriptor {
    pub counter_type: CounterType,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub parameter: Option<ParameterSpec>,
    #[serde(skip)]
    pub projection: Projection,
}

impl CounterDescriptor {
    pub const fn has_parameter(&self) -> bool {
        self.parameter.is_some()
    }
}
