// crates/ports/src/properties.rs
use notestat_shared_kernel::{DocumentId, Result};

/// Numeric per-document properties.
pub trait PropertyStore: Send + Sync {
    /// Set `name` to `value`, creating it as a number when absent.
    /// Every other property of the document must be left untouched.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::PropertyWriteFailed` when the write fails.
    fn set_property(&self, document: &DocumentId, name: &str, value: u64) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error when the document cannot be read.
    fn get_property(&self, document: &DocumentId, name: &str) -> Result<Option<u64>>;
}
