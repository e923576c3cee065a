pub mod counts;
pub mod document;

pub use counts::{CharCount, HeadingCount, LineCount, WordCount};
pub use document::DocumentId;
