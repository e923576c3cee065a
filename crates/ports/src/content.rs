// crates/ports/src/content.rs
use notestat_shared_kernel::{DocumentId, Result};

/// Port for reading raw document content (front matter + body).
///
/// Implementations should serve the same text a metadata index was built from,
/// otherwise cached spans and heading positions stop lining up with the content.
pub trait ContentStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `InfrastructureError::ContentUnavailable` when the document cannot be read.
    fn read_content(&self, document: &DocumentId) -> Result<String>;

    /// Every document the store knows about, in a stable order.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing itself fails.
    fn list_documents(&self) -> Result<Vec<DocumentId>>;
}
