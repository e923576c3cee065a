//! # Domain
//!
//! Pure statistics logic for markdown notes:
//!
//! - [`analysis`]: front-matter stripping and the text counting primitives
//! - [`counter`]: the closed catalogue of counter types and their projections
//! - [`config`]: user-defined counter configurations and their validation
//! - [`model`]: computed statistics and per-pass results
//!
//! Nothing here performs I/O.

#![allow(clippy::multiple_crate_versions)]

pub mod analysis;
pub mod config;
pub mod counter;
pub mod model;

pub use config::{
    CounterConfig, CounterDraft, CounterId, CounterParameter, CounterSet, ValidationError,
};
pub use counter::{CounterDescriptor, CounterRegistry, CounterType, ParameterKind};
pub use model::{
    CountResult, FileStats, FrontMatterSpan, Heading, HeadingLevel, HeadingPosition,
};
