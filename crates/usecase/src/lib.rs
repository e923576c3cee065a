//! # Use Cases
//!
//! Application-level orchestration of the statistics engine.
//!
//! This crate coordinates domain logic and the collaborator ports:
//!
//! - [`engine`]: single-document, cache-assisted and preview calculations
//! - [`batch`]: sequential whole-collection runs with progress reporting
//! - [`dto`]: reports handed back to callers
//!
//! Use cases depend on both domain and ports, but not on infrastructure.

#![allow(clippy::multiple_crate_versions)]

pub mod batch;
pub mod dto;
pub mod engine;

pub use dto::{BatchSummary, CalculationReport, CounterFailure, FailureKind};
pub use engine::{EnginePorts, EngineSettings, StatisticsEngine};

#[cfg(test)]
mod test_support;
