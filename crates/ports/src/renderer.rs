// crates/ports/src/renderer.rs
use notestat_shared_kernel::{DocumentId, Result};

/// Converts a markdown body to the visible plain text a reader sees.
///
/// Structural markup (heading markers, table separator rows, emphasis, link
/// targets) is dropped; visible words and line breaks are kept.
pub trait Renderer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when rendering fails.
    fn render_plain_text(&self, body: &str, document: &DocumentId) -> Result<String>;
}
