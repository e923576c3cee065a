// crates/infra/src/front_matter.rs
//! Numeric properties stored as keys of a document's YAML front matter.

use serde_yaml::{Mapping, Value};

use notestat_domain::analysis::scan_front_matter;
use notestat_ports::PropertyStore;
use notestat_shared_kernel::{DocumentId, InfrastructureError, Result};

use crate::{
    filesystem::FsVault,
    persistence::{FileReader, FileWriter},
};

const DELIMITER: &str = "---";

/// Byte layout of an existing front-matter block.
struct Block<'a> {
    /// Opening delimiter line including its terminator.
    opening: &'a str,
    yaml: &'a str,
    /// Closing delimiter and everything after it, untouched.
    rest: &'a str,
}

fn locate(content: &str) -> Option<Block<'_>> {
    let span = scan_front_matter(content)?;
    let mut offset = 0;
    let mut opening_end = None;
    for (index, line) in content.split_inclusive('\n').enumerate() {
        if index == span.start_line {
            opening_end = Some(offset + line.len());
        }
        if index == span.end_line {
            let opening_end = opening_end?;
            return Some(Block {
                opening: &content[..opening_end],
                yaml: &content[opening_end..offset],
                rest: &content[offset..],
            });
        }
        offset += line.len();
    }
    None
}

fn parse_mapping(yaml: &str) -> std::result::Result<Mapping, String> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(yaml).map_err(|err| err.to_string())? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err("front matter is not a key/value mapping".to_string()),
    }
}

fn render_mapping(mapping: &Mapping, line_ending: &str) -> std::result::Result<String, String> {
    let yaml = serde_yaml::to_string(mapping).map_err(|err| err.to_string())?;
    Ok(if line_ending == "\n" { yaml } else { yaml.replace('\n', line_ending) })
}

/// `name: value` as serde_yaml writes it, without a line terminator.
fn entry_line(name: &str, value: u64) -> std::result::Result<String, String> {
    let mut entry = Mapping::new();
    entry.insert(Value::from(name), Value::from(value));
    let yaml = serde_yaml::to_string(&entry).map_err(|err| err.to_string())?;
    Ok(yaml.trim_end_matches('\n').to_string())
}

/// Trailing comment of a top-level `name: <scalar>` line, `""` when there is none.
///
/// `None` when `line` is not such a line (nested, block or empty values).
fn scalar_line_comment<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let text = line.trim_end_matches(['\r', '\n']);
    if text.starts_with(char::is_whitespace) {
        return None;
    }
    let (key, rest) = text.split_once(':')?;
    let key = key.trim_end();
    let key = key
        .strip_prefix('"')
        .and_then(|k| k.strip_suffix('"'))
        .or_else(|| key.strip_prefix('\'').and_then(|k| k.strip_suffix('\'')))
        .unwrap_or(key);
    if key != name || !(rest.is_empty() || rest.starts_with(' ')) {
        return None;
    }
    let value = rest.trim();
    if value.is_empty() || value.starts_with('#') || value.starts_with(['|', '>']) {
        return None;
    }
    Some(rest.find(" #").map_or("", |index| &rest[index..]))
}

/// Rewrite only the line holding `name`, or append one when `name` is new.
///
/// Comments, flow collections and key order of the other lines stay as written.
/// `None` when an existing value spans more than its own line.
fn edit_lines(yaml: &str, name: &str, entry: &str, exists: bool, line_ending: &str) -> Option<String> {
    let mut out = String::with_capacity(yaml.len() + entry.len() + line_ending.len());
    let mut replaced = false;
    for line in yaml.split_inclusive('\n') {
        match scalar_line_comment(line, name) {
            Some(comment) if !replaced => {
                out.push_str(entry);
                out.push_str(comment);
                out.push_str(line_ending);
                replaced = true;
            }
            _ => out.push_str(line),
        }
    }
    if exists && !replaced {
        return None;
    }
    if !replaced {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push_str(line_ending);
        }
        out.push_str(entry);
        out.push_str(line_ending);
    }
    Some(out)
}

/// Read `name` from the front matter of `content`.
///
/// Only non-negative integers count as a stored value.
///
/// # Errors
///
/// Returns a message when the front matter exists but is not a YAML mapping.
pub fn read_property(content: &str, name: &str) -> std::result::Result<Option<u64>, String> {
    let Some(block) = locate(content) else {
        return Ok(None);
    };
    let mapping = parse_mapping(block.yaml)?;
    Ok(mapping.get(name).and_then(Value::as_u64))
}

/// Set `name` to `value` in the front matter of `content`.
///
/// Returns `None` when the stored value is already `value`. Only the line of
/// `name` changes (or one line is appended), so other keys, comments and flow
/// lists are kept as written; blocks that cannot be edited line by line are
/// re-serialised. The body after the block is preserved byte for byte and a
/// block is created when the document has none.
///
/// # Errors
///
/// Returns a message when the existing front matter cannot be parsed as a mapping.
pub fn upsert_property(content: &str, name: &str, value: u64) -> std::result::Result<Option<String>, String> {
    match locate(content) {
        Some(block) => {
            let mut mapping = parse_mapping(block.yaml)?;
            let key = Value::from(name);
            let stored = mapping.get(&key);
            if stored.and_then(Value::as_u64) == Some(value) {
                return Ok(None);
            }
            let exists = stored.is_some();
            mapping.insert(key, Value::from(value));

            let line_ending = if block.opening.ends_with("\r\n") { "\r\n" } else { "\n" };
            let entry = entry_line(name, value)?;
            // 行単位の編集が同じ内容に読めるときだけ採用し、それ以外は全体を書き直す
            let yaml = match edit_lines(block.yaml, name, &entry, exists, line_ending) {
                Some(edited) if parse_mapping(&edited).is_ok_and(|parsed| parsed == mapping) => edited,
                _ => {
                    log::debug!("front matter re-serialised to set '{name}'");
                    render_mapping(&mapping, line_ending)?
                }
            };
            Ok(Some(format!("{}{yaml}{}", block.opening, block.rest)))
        }
        None => {
            let mut mapping = Mapping::new();
            mapping.insert(Value::from(name), Value::from(value));
            let yaml = render_mapping(&mapping, "\n")?;
            Ok(Some(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{content}")))
        }
    }
}

/// [`PropertyStore`] over the markdown files of an [`FsVault`].
#[derive(Debug, Clone)]
pub struct FrontMatterPropertyStore {
    vault: FsVault,
}

impl FrontMatterPropertyStore {
    pub fn new(vault: FsVault) -> Self {
        Self { vault }
    }

    fn write_failed(document: &DocumentId, property: &str, reason: impl ToString) -> InfrastructureError {
        InfrastructureError::PropertyWriteFailed {
            document: document.to_string(),
            property: property.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl PropertyStore for FrontMatterPropertyStore {
    fn set_property(&self, document: &DocumentId, name: &str, value: u64) -> Result<()> {
        let path = self.vault.path_of(document);
        let content = FileReader::read_text(&path).map_err(|err| Self::write_failed(document, name, err))?;

        let Some(updated) = upsert_property(&content, name, value).map_err(|err| Self::write_failed(document, name, err))?
        else {
            log::trace!("{document}: {name} already {value}");
            return Ok(());
        };

        FileWriter::atomic_write(&path, updated.as_bytes()).map_err(|err| Self::write_failed(document, name, err))?;
        Ok(())
    }

    fn get_property(&self, document: &DocumentId, name: &str) -> Result<Option<u64>> {
        let path = self.vault.path_of(document);
        let content = FileReader::read_text(&path)?;
        read_property(&content, name).map_err(|details| {
            InfrastructureError::SerializationError { format: "YAML", details }.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn updates_key_and_keeps_the_rest() {
        let content = "---\ntitle: Demo\ntags:\n- a\nword_count: 3\n---\n# Body\n\ntext  \n";
        let updated = upsert_property(content, "word_count", 12).unwrap().unwrap();
        assert_eq!(updated, "---\ntitle: Demo\ntags:\n- a\nword_count: 12\n---\n# Body\n\ntext  \n");
    }

    #[test]
    fn appends_new_key() {
        let updated = upsert_property("---\ntitle: Demo\n---\nbody", "lines", 1).unwrap().unwrap();
        assert_eq!(updated, "---\ntitle: Demo\nlines: 1\n---\nbody");
    }

    #[test]
    fn unchanged_value_skips_the_write() {
        assert_eq!(upsert_property("---\nlines: 4\n---\nbody", "lines", 4).unwrap(), None);
    }

    #[test]
    fn creates_block_when_missing() {
        let updated = upsert_property("# Title\nbody", "words", 3).unwrap().unwrap();
        assert_eq!(updated, "---\nwords: 3\n---\n# Title\nbody");
    }

    #[test]
    fn empty_block_is_filled() {
        let updated = upsert_property("---\n---\nbody", "words", 1).unwrap().unwrap();
        assert_eq!(updated, "---\nwords: 1\n---\nbody");
    }

    #[test]
    fn crlf_documents_stay_crlf() {
        let updated = upsert_property("---\r\na: 1\r\n---\r\nbody\r\n", "b", 2).unwrap().unwrap();
        assert_eq!(updated, "---\r\na: 1\r\nb: 2\r\n---\r\nbody\r\n");
    }

    #[test]
    fn comments_and_flow_lists_survive() {
        let content = "---\n# managed by hand\ntags: [a, b]\nword_count: 3 # auto\n---\nbody";
        let updated = upsert_property(content, "word_count", 4).unwrap().unwrap();
        assert_eq!(updated, "---\n# managed by hand\ntags: [a, b]\nword_count: 4 # auto\n---\nbody");

        let appended = upsert_property(&updated, "lines", 1).unwrap().unwrap();
        assert_eq!(appended, "---\n# managed by hand\ntags: [a, b]\nword_count: 4 # auto\nlines: 1\n---\nbody");
    }

    #[test]
    fn nested_key_with_same_name_is_not_touched() {
        let content = "---\nmeta:\n  words: 1\nwords: 2\n---\n";
        let updated = upsert_property(content, "words", 9).unwrap().unwrap();
        assert_eq!(updated, "---\nmeta:\n  words: 1\nwords: 9\n---\n");
    }

    #[test]
    fn multi_line_value_falls_back_to_reserialising() {
        let updated = upsert_property("---\nwords:\n  3\ntitle: x\n---\nbody", "words", 5).unwrap().unwrap();
        assert_eq!(updated, "---\nwords: 5\ntitle: x\n---\nbody");

        let null_block = upsert_property("---\n~\n---\nbody", "words", 1).unwrap().unwrap();
        assert_eq!(null_block, "---\nwords: 1\n---\nbody");
    }

    #[test]
    fn quoted_key_is_edited_in_place() {
        let updated = upsert_property("---\n'words': 1 # x\ntitle: t\n---\n", "words", 2).unwrap().unwrap();
        assert_eq!(updated, "---\nwords: 2 # x\ntitle: t\n---\n");
    }

    #[test]
    fn scalar_front_matter_is_rejected() {
        assert!(upsert_property("---\njust text\n---\nbody", "words", 1).is_err());
    }

    #[test]
    fn read_property_ignores_non_numbers() {
        let content = "---\nwords: 7\ntitle: x\n---\n";
        assert_eq!(read_property(content, "words").unwrap(), Some(7));
        assert_eq!(read_property(content, "title").unwrap(), None);
        assert_eq!(read_property("no block", "words").unwrap(), None);
    }

    #[test]
    fn store_writes_and_reads_back() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("n.md"), "---\ntitle: Trip\n---\nhello world").unwrap();
        let store = FrontMatterPropertyStore::new(FsVault::new(dir.path()));
        let id = DocumentId::from("n.md");

        store.set_property(&id, "word_count", 2).unwrap();

        assert_eq!(store.get_property(&id, "word_count").unwrap(), Some(2));
        assert_eq!(
            fs::read_to_string(dir.path().join("n.md")).unwrap(),
            "---\ntitle: Trip\nword_count: 2\n---\nhello world"
        );
    }

    #[test]
    fn store_reports_missing_document() {
        let dir = tempdir().unwrap();
        let store = FrontMatterPropertyStore::new(FsVault::new(dir.path()));
        let err = store.set_property(&DocumentId::from("gone.md"), "words", 1).unwrap_err();
        assert!(err.to_string().contains("Failed to write property 'words' on 'gone.md'"));
    }
}
