//! # Ports
//!
//! Interface definitions for the collaborators the statistics engine needs.
//!
//! This crate defines traits that abstract external concerns:
//!
//! - [`content`]: raw document content
//! - [`metadata`]: host-maintained front-matter and heading index
//! - [`renderer`]: plain-text rendering for the "rendered" counting mode
//! - [`properties`]: per-document numeric property storage
//! - [`notifier`]: best-effort user-facing progress and results
//! - [`logger`]: diagnostics with an injected verbosity
//! - [`hashing`]: content fingerprints for index caches
//!
//! These ports allow the domain and application layers to remain
//! independent of specific implementations.

// crates/ports/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod content;
pub mod hashing;
pub mod logger;
pub mod metadata;
pub mod notifier;
pub mod properties;
pub mod renderer;

pub use content::ContentStore;
pub use hashing::{ContentHasher, HashValue};
pub use logger::{Logger, NullLogger};
pub use metadata::{DocumentMetadata, MetadataIndex};
pub use notifier::{Notifier, SilentNotifier};
pub use properties::PropertyStore;
pub use renderer::Renderer;
