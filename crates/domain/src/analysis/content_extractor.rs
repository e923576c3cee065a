use std::borrow::Cow;

use crate::model::FrontMatterSpan;

const FRONT_MATTER_DELIMITER: &str = "---";

/// Split on `\n`, dropping a trailing `\r` so that CRLF and LF behave the same.
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Remove the lines covered by `span` and rejoin the rest with `\n`.
///
/// Without a span the content is returned untouched. A span that is inverted or
/// reaches past the last line is treated as "no front matter".
pub fn extract_body(content: &str, span: Option<FrontMatterSpan>) -> Cow<'_, str> {
    let Some(span) = span else {
        return Cow::Borrowed(content);
    };

    let lines = split_lines(content);
    if !span.is_valid_for(lines.len()) {
        return Cow::Borrowed(content);
    }

    let before = &lines[..span.start_line];
    let after = &lines[span.end_line + 1..];
    Cow::Owned(before.iter().chain(after).copied().collect::<Vec<_>>().join("\n"))
}

/// 構造スキャンでフロントマターの範囲を求める
///
/// The block must open on the first line with `---` and close with another `---`
/// line; an unterminated block is not front matter.
pub fn scan_front_matter(content: &str) -> Option<FrontMatterSpan> {
    let mut lines = split_lines(content).into_iter().enumerate();

    let (_, first) = lines.next()?;
    if first.trim_end() != FRONT_MATTER_DELIMITER {
        return None;
    }

    lines
        .find(|(_, line)| line.trim_end() == FRONT_MATTER_DELIMITER)
        .map(|(end, _)| FrontMatterSpan::new(0, end))
}

/// Body resolution: prefer the span a metadata cache already knows, otherwise scan.
pub fn resolve_body(content: &str, cached_span: Option<FrontMatterSpan>) -> Cow<'_, str> {
    let span = cached_span.or_else(|| scan_front_matter(content));
    extract_body(content, span)
}
