use serde::{Deserialize, Serialize};

/// Line range occupied by the front matter block, delimiters included.
///
/// Both lines are 0-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatterSpan {
    pub start_line: usize,
    pub end_line: usize,
}

impl FrontMatterSpan {
    pub const fn new(start_line: usize, end_line: usize) -> Self {
        Self { start_line, end_line }
    }

    /// A span is usable only when it is ordered and lies inside a document of `line_count` lines.
    pub const fn is_valid_for(&self, line_count: usize) -> bool {
        self.start_line <= self.end_line && self.end_line < line_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_span_is_invalid() {
        assert!(!FrontMatterSpan::new(3, 1).is_valid_for(10));
    }

    #[test]
    fn span_past_end_is_invalid() {
        assert!(!FrontMatterSpan::new(0, 4).is_valid_for(4));
        assert!(FrontMatterSpan::new(0, 3).is_valid_for(4));
    }
}
