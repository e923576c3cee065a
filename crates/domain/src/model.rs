pub mod count_result;
pub mod file_stats;
pub mod heading;
pub mod span;

pub use count_result::CountResult;
pub use file_stats::FileStats;
pub use heading::{Heading, HeadingLevel, HeadingPosition};
pub use span::FrontMatterSpan;
