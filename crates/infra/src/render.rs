// crates/infra/src/render.rs
use std::sync::OnceLock;

use regex::Regex;

use notestat_ports::Renderer;
use notestat_shared_kernel::{DocumentId, Result};

/// Ordered rewrite rules; later rules see the output of earlier ones.
fn rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            // code fences (the code itself stays)
            (r"(?m)^[ \t]*(?:```|~~~).*$", ""),
            // thematic breaks
            (r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$", ""),
            // table separator rows
            (r"(?m)^[ \t]*\|?[ \t]*:?-{3,}:?[ \t]*(?:\|[ \t]*:?-{3,}:?[ \t]*)*\|?[ \t]*$", ""),
            // images keep alt text, links keep their label
            (r"!\[([^\]]*)\]\([^)]*\)", "$1"),
            (r"\[([^\]]+)\]\([^)]*\)", "$1"),
            // [[target|alias]] / [[target]]
            (r"\[\[[^\]|]+\|([^\]]+)\]\]", "$1"),
            (r"\[\[([^\]]+)\]\]", "$1"),
            (r"(?m)^[ \t]{0,3}#{1,6}[ \t]+", ""),
            (r"(?m)^[ \t]*(?:>[ \t]?)+", ""),
            (r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+(?:\[[ xX]\][ \t]+)?", ""),
            (r"<[^>\n]+>", ""),
            (r"\*{1,3}|~~|`+", ""),
            (r"\|", " "),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (Regex::new(pattern).expect("render pattern is valid"), replacement)
        })
        .collect()
    })
}

/// Markdown to plain text, good enough for counting.
///
/// Markup characters are removed and link targets dropped; line structure is
/// kept. Underscore emphasis is left alone because `_` is a word character.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub fn render(body: &str) -> String {
        rules().iter().fold(body.to_string(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
    }
}

impl Renderer for PlainTextRenderer {
    fn render_plain_text(&self, body: &str, _document: &DocumentId) -> Result<String> {
        Ok(Self::render(body))
    }
}
