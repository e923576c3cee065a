//! Front-matter aware extraction and the counting primitives.

pub mod content_extractor;
pub mod text_analyzer;

pub use content_extractor::{extract_body, resolve_body, scan_front_matter, split_lines};
pub use text_analyzer::{
    count_characters_with_spaces, count_characters_without_spaces, count_headings_by_level,
    count_lines, count_words, extract_headings, tally_levels,
};
