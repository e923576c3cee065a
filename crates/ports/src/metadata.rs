// crates/ports/src/metadata.rs
use notestat_domain::{FrontMatterSpan, HeadingPosition};
use notestat_shared_kernel::DocumentId;

/// Structural metadata of one version of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub front_matter: Option<FrontMatterSpan>,
    /// Headings after the front matter, in document order.
    pub headings: Vec<HeadingPosition>,
}

/// Structural metadata a host keeps per document.
///
/// The caller passes the content it has already read, so the span and the
/// headings always describe that exact text. `None` means "not cached" and the
/// caller scans the content itself.
pub trait MetadataIndex: Send + Sync {
    fn lookup(&self, document: &DocumentId, content: &str) -> Option<DocumentMetadata>;
}
