//! # Infrastructure
//!
//! Adapters that bind the ports to a directory of markdown notes:
//!
//! - [`filesystem`]: the vault as a [`notestat_ports::ContentStore`]
//! - [`front_matter`]: numeric properties kept in YAML front matter
//! - [`index`]: hash-keyed metadata cache
//! - [`render`]: markdown to plain text
//! - [`console`]: stderr logging and user notices
//! - [`watch`]: debounced change notifications

// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod console;
pub mod filesystem;
pub mod front_matter;
pub mod index;
pub mod persistence;
pub mod render;
pub mod watch;

pub use console::{ConsoleLogger, ConsoleNotifier};
pub use filesystem::FsVault;
pub use front_matter::FrontMatterPropertyStore;
pub use index::{ScanningMetadataIndex, Xxh3Hasher};
pub use render::PlainTextRenderer;
pub use watch::WatchService;
