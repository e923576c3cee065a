use super::{CounterDescriptor, CounterType, ParameterKind, ParameterSpec};
use crate::model::{FileStats, HeadingLevel};

pub(super) static WORD_COUNT: CounterDescriptor = CounterDescriptor {
    counter_type: CounterType::WordCount,
    key: "word-count",
    name: "Word count",
    description: "Number of words in the body",
    parameter: None,
    projection: project_words,
};

pub(super) static CHAR_COUNT_WITH_SPACES: CounterDescriptor = CounterDescriptor {
    counter_type: CounterType::CharCountWithSpaces,
    key: "char-count-with-spaces",
    name: "Character count (with spaces)",
    description: "Number of characters (Unicode scalar values, an emoji counts as 1) in the body, whitespace included",
    parameter: None,
    projection: project_chars_with_spaces,
};

pub(super) static CHAR_COUNT_WITHOUT_SPACES: CounterDescriptor = CounterDescriptor {
    counter_type: CounterType::CharCountWithoutSpaces,
    key: "char-count-without-spaces",
    name: "Character count (without spaces)",
    description: "Number of characters (Unicode scalar values, an emoji counts as 1) in the body, whitespace excluded",
    parameter: None,
    projection: project_chars_without_spaces,
};

pub(super) static LINE_COUNT: CounterDescriptor = CounterDescriptor {
    counter_type: CounterType::LineCount,
    key: "line-count",
    name: "Line count",
    description: "Number of lines in the body",
    parameter: None,
    projection: project_lines,
};

pub(super) static HEADING_COUNT: CounterDescriptor = CounterDescriptor {
    counter_type: CounterType::HeadingCount,
    key: "heading-count",
    name: "Heading count",
    description: "Number of headings of any level",
    parameter: None,
    projection: project_headings,
};

pub(super) static HEADING_LEVEL_COUNT: CounterDescriptor = CounterDescriptor {
    counter_type: CounterType::HeadingLevelCount,
    key: "heading-level-count",
    name: "Heading count by level",
    description: "Number of headings at one specific level",
    parameter: Some(ParameterSpec {
        name: "Heading level",
        kind: ParameterKind::Number,
        min: HeadingLevel::MIN as i64,
        max: HeadingLevel::MAX as i64,
    }),
    projection: project_heading_level,
};

fn project_words(stats: &FileStats, _: Option<HeadingLevel>) -> usize {
    stats.word_count().value()
}

fn project_chars_with_spaces(stats: &FileStats, _: Option<HeadingLevel>) -> usize {
    stats.char_count_with_spaces().value()
}

fn project_chars_without_spaces(stats: &FileStats, _: Option<HeadingLevel>) -> usize {
    stats.char_count_without_spaces().value()
}

fn project_lines(stats: &FileStats, _: Option<HeadingLevel>) -> usize {
    stats.line_count().value()
}

fn project_headings(stats: &FileStats, _: Option<HeadingLevel>) -> usize {
    stats.heading_count().value()
}

fn project_heading_level(stats: &FileStats, level: Option<HeadingLevel>) -> usize {
    level.map_or(0, |level| stats.headings_at(level))
}

/// Read-only lookup over the counter catalogue.
pub struct CounterRegistry;

impl CounterRegistry {
    /// Descriptors in catalogue order.
    pub fn all() -> impl Iterator<Item = &'static CounterDescriptor> {
        CounterType::ALL.into_iter().map(CounterType::descriptor)
    }

    pub fn get(counter_type: CounterType) -> &'static CounterDescriptor {
        counter_type.descriptor()
    }

    /// Case-insensitive lookup by key; unknown keys yield `None`.
    pub fn find(key: &str) -> Option<&'static CounterDescriptor> {
        let key = key.trim();
        Self::all().find(|descriptor| descriptor.key.eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use notestat_shared_kernel::{CharCount, LineCount, WordCount};

    fn sample_stats() -> FileStats {
        FileStats::builder()
            .words(WordCount::new(10))
            .chars_with_spaces(CharCount::new(60))
            .chars_without_spaces(CharCount::new(50))
            .lines(LineCount::new(4))
            .headings_by_level(BTreeMap::from([(HeadingLevel::new(2).unwrap(), 3)]))
            .build()
    }

    #[test]
    fn catalogue_order_is_stable() {
        let keys: Vec<_> = CounterRegistry::all().map(|d| d.key).collect();
        assert_eq!(
            keys,
            vec![
                "word-count",
                "char-count-with-spaces",
                "char-count-without-spaces",
                "line-count",
                "heading-count",
                "heading-level-count",
            ]
        );
    }

    #[test]
    fn find_is_case_insensitive_and_total() {
        assert_eq!(CounterRegistry::find("LINE-COUNT").map(|d| d.counter_type), Some(CounterType::LineCount));
        assert!(CounterRegistry::find("paragraphs").is_none());
        assert!(CounterRegistry::find("").is_none());
    }

    #[test]
    fn character_counters_name_their_unit() {
        for counter_type in [CounterType::CharCountWithSpaces, CounterType::CharCountWithoutSpaces] {
            let description = CounterRegistry::get(counter_type).description;
            assert!(description.contains("Unicode scalar values"), "{description}");
            assert!(description.contains("emoji counts as 1"), "{description}");
        }
    }

    #[test]
    fn heading_level_parameter_range() {
        let spec = CounterRegistry::get(CounterType::HeadingLevelCount).parameter.unwrap();
        assert_eq!((spec.min, spec.max), (1, 6));
        assert_eq!(spec.kind, ParameterKind::Number);
        assert!(spec.contains(6));
        assert!(!spec.contains(0));
    }

    #[test]
    fn projections_read_matching_fields() {
        let stats = sample_stats();
        let project = |t: CounterType, level| (t.descriptor().projection)(&stats, level);
        assert_eq!(project(CounterType::WordCount, None), 10);
        assert_eq!(project(CounterType::CharCountWithSpaces, None), 60);
        assert_eq!(project(CounterType::CharCountWithoutSpaces, None), 50);
        assert_eq!(project(CounterType::LineCount, None), 4);
        assert_eq!(project(CounterType::HeadingCount, None), 3);
        assert_eq!(project(CounterType::HeadingLevelCount, HeadingLevel::new(2)), 3);
        assert_eq!(project(CounterType::HeadingLevelCount, HeadingLevel::new(1)), 0);
    }
}
