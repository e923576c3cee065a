use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::HeadingLevel;
use notestat_shared_kernel::{CharCount, HeadingCount, LineCount, WordCount};

/// Base statistics for one document body.
///
/// Derived fresh on every computation; only per-counter projections are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    word_count: WordCount,
    char_count_with_spaces: CharCount,
    char_count_without_spaces: CharCount,
    line_count: LineCount,
    heading_count: HeadingCount,
    headings_by_level: BTreeMap<HeadingLevel, usize>,
}

impl FileStats {
    pub fn builder() -> FileStatsBuilder {
        FileStatsBuilder::default()
    }

    #[inline]
    pub fn word_count(&self) -> WordCount {
        self.word_count
    }

    #[inline]
    pub fn char_count_with_spaces(&self) -> CharCount {
        self.char_count_with_spaces
    }

    #[inline]
    pub fn char_count_without_spaces(&self) -> CharCount {
        self.char_count_without_spaces
    }

    #[inline]
    pub fn line_count(&self) -> LineCount {
        self.line_count
    }

    #[inline]
    pub fn heading_count(&self) -> HeadingCount {
        self.heading_count
    }

    pub fn headings_by_level(&self) -> &BTreeMap<HeadingLevel, usize> {
        &self.headings_by_level
    }

    /// Headings at `level`; levels absent from the map count as zero.
    pub fn headings_at(&self, level: HeadingLevel) -> usize {
        self.headings_by_level.get(&level).copied().unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct FileStatsBuilder {
    word_count: WordCount,
    char_count_with_spaces: CharCount,
    char_count_without_spaces: CharCount,
    line_count: LineCount,
    headings_by_level: BTreeMap<HeadingLevel, usize>,
}

impl FileStatsBuilder {
    pub fn words(mut self, words: WordCount) -> Self {
        self.word_count = words;
        self
    }

    pub fn chars_with_spaces(mut self, chars: CharCount) -> Self {
        self.char_count_with_spaces = chars;
        self
    }

    pub fn chars_without_spaces(mut self, chars: CharCount) -> Self {
        self.char_count_without_spaces = chars;
        self
    }

    pub fn lines(mut self, lines: LineCount) -> Self {
        self.line_count = lines;
        self
    }

    pub fn headings_by_level(mut self, headings: BTreeMap<HeadingLevel, usize>) -> Self {
        self.headings_by_level = headings;
        self
    }

    /// 見出しの総数はレベル別集計の合計から導出する
    pub fn build(self) -> FileStats {
        let heading_count = self.headings_by_level.values().copied().collect::<HeadingCount>();
        FileStats {
            word_count: self.word_count,
            char_count_with_spaces: self.char_count_with_spaces,
            char_count_without_spaces: self.char_count_without_spaces,
            line_count: self.line_count,
            heading_count,
            headings_by_level: self.headings_by_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> HeadingLevel {
        HeadingLevel::new(n).unwrap()
    }

    #[test]
    fn builder_derives_heading_total() {
        let stats = FileStats::builder()
            .words(WordCount::new(12))
            .lines(LineCount::new(3))
            .headings_by_level(BTreeMap::from([(level(1), 1), (level(2), 2)]))
            .build();

        assert_eq!(stats.word_count(), 12usize);
        assert_eq!(stats.line_count(), 3usize);
        assert_eq!(stats.heading_count(), 3usize);
    }

    #[test]
    fn missing_level_defaults_to_zero() {
        let stats = FileStats::builder()
            .headings_by_level(BTreeMap::from([(level(1), 4)]))
            .build();
        assert_eq!(stats.headings_at(level(1)), 4);
        assert_eq!(stats.headings_at(level(5)), 0);
    }
}
