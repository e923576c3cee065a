// src/presentation.rs
use std::fmt::Write as _;

use serde::Serialize;

use notestat_domain::{CounterRegistry, CounterSet, FileStats};
use notestat_shared_kernel::{DocumentId, Result};

const LABEL_WIDTH: usize = 28;

#[derive(Serialize)]
struct PreviewJson<'a> {
    document: &'a DocumentId,
    stats: &'a FileStats,
}

/// 統計を人間向けのテキストに整形する
pub fn stats_text(document: &DocumentId, stats: &FileStats) -> String {
    let mut out = format!("{document}\n");
    let rows = [
        ("words", stats.word_count().value()),
        ("characters (with spaces)", stats.char_count_with_spaces().value()),
        ("characters (without spaces)", stats.char_count_without_spaces().value()),
        ("lines", stats.line_count().value()),
        ("headings", stats.heading_count().value()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<LABEL_WIDTH$} {value:>8}");
    }
    for (level, count) in stats.headings_by_level() {
        let _ = writeln!(out, "    {:<width$} {count:>8}", level.to_string(), width = LABEL_WIDTH - 2);
    }
    out
}

/// # Errors
///
/// Fails only if serialisation fails.
pub fn stats_json(document: &DocumentId, stats: &FileStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(&PreviewJson { document, stats })?)
}

/// Counter catalogue followed by the configured counters.
pub fn counters_text(counters: &CounterSet) -> String {
    let mut out = String::from("Available counter types:\n");
    for descriptor in CounterRegistry::all() {
        let _ = write!(out, "  {:<26} {}", descriptor.key, descriptor.description);
        if let Some(parameter) = descriptor.parameter {
            let _ = write!(out, " ({} {}..={})", parameter.name.to_lowercase(), parameter.min, parameter.max);
        }
        out.push('\n');
    }

    out.push_str("\nConfigured counters:\n");
    if counters.is_empty() {
        out.push_str("  (none)\n");
    }
    for config in counters.iter() {
        let state = if config.is_enabled() { "on " } else { "off" };
        let _ = write!(out, "  [{state}] {:<20} {}", config.property(), config.counter_type());
        if let Some(parameter) = config.parameter() {
            let _ = write!(out, " {parameter}");
        }
        if !config.name().is_empty() {
            let _ = write!(out, "  # {}", config.name());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use notestat_domain::{CounterDraft, CounterParameter, CounterType, HeadingLevel};
    use notestat_shared_kernel::{CharCount, LineCount, WordCount};

    use super::*;

    fn stats() -> FileStats {
        FileStats::builder()
            .words(WordCount::new(12))
            .chars_with_spaces(CharCount::new(60))
            .chars_without_spaces(CharCount::new(50))
            .lines(LineCount::new(4))
            .headings_by_level(BTreeMap::from([(HeadingLevel::new(2).unwrap(), 3)]))
            .build()
    }

    #[test]
    fn text_lists_every_statistic() {
        let text = stats_text(&DocumentId::from("a.md"), &stats());
        assert!(text.starts_with("a.md\n"));
        assert!(text.contains("words"));
        assert!(text.lines().any(|l| l.trim_start().starts_with("h2") && l.trim_end().ends_with('3')));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn json_is_machine_readable() {
        let json = stats_json(&DocumentId::from("a.md"), &stats()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["document"], "a.md");
        assert_eq!(value["stats"]["word_count"], 12);
        assert_eq!(value["stats"]["heading_count"], 3);
        assert_eq!(value["stats"]["headings_by_level"]["2"], 3);
    }

    #[test]
    fn counters_listing_shows_catalogue_and_state() {
        let set = CounterSet::new()
            .add(CounterDraft::new(CounterType::WordCount, "words"))
            .unwrap()
            .add(CounterDraft::new(CounterType::HeadingLevelCount, "h2").with_parameter(CounterParameter::Integer(2)).disabled())
            .unwrap();
        let text = counters_text(&set);
        assert!(text.contains("heading-level-count"));
        assert!(text.contains("heading level 1..=6"));
        assert!(text.contains("[on ] words"));
        assert!(text.contains("[off] h2"));
    }
}
