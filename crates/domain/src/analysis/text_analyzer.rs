//! Counting primitives over a single string.
//!
//! Word boundaries follow one fixed rule: a word is a maximal run of `\w`
//! characters (letters, digits, underscore). There is no locale handling, so
//! `well-known` counts as two words and `don't` as two as well.

use std::{collections::BTreeMap, sync::OnceLock};

use regex::Regex;

use super::content_extractor::split_lines;
use crate::model::{Heading, HeadingLevel};
use notestat_shared_kernel::{CharCount, LineCount, WordCount};

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern is valid"))
}

pub fn count_words(s: &str) -> WordCount {
    WordCount::new(word_regex().find_iter(s).count())
}

/// Length of `s` in Unicode scalar values.
pub fn count_characters_with_spaces(s: &str) -> CharCount {
    CharCount::new(s.chars().count())
}

pub fn count_characters_without_spaces(s: &str) -> CharCount {
    CharCount::new(s.chars().filter(|c| !c.is_whitespace()).count())
}

/// Terminator count plus one; the empty string has no lines at all.
pub fn count_lines(s: &str) -> LineCount {
    if s.is_empty() {
        return LineCount::zero();
    }
    // `\r\n` contains exactly one `\n`, so counting LF covers both terminators.
    LineCount::new(s.matches('\n').count() + 1)
}

/// 行ごとに見出しを抽出する
pub fn extract_headings(s: &str) -> Vec<Heading> {
    let re = heading_regex();
    split_lines(s)
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let caps = re.captures(line)?;
            let text = caps.get(2)?.as_str().trim();
            if text.is_empty() {
                return None;
            }
            let hashes = caps.get(1)?.as_str().len();
            let level = HeadingLevel::new(u8::try_from(hashes).ok()?)?;
            Some(Heading { level, text: text.to_string(), line_number: index + 1 })
        })
        .collect()
}

/// Group levels into a level → count map; only levels that occur get a key.
pub fn tally_levels<I>(levels: I) -> BTreeMap<HeadingLevel, usize>
where
    I: IntoIterator<Item = HeadingLevel>,
{
    levels.into_iter().fold(BTreeMap::new(), |mut acc, level| {
        *acc.entry(level).or_insert(0) += 1;
        acc
    })
}

pub fn count_headings_by_level(s: &str) -> BTreeMap<HeadingLevel, usize> {
    tally_levels(extract_headings(s).into_iter().map(|h| h.level))
}
