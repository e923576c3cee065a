//! In-memory stubs for the engine ports.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use log::Level;

use notestat_domain::{
    HeadingPosition,
    analysis::{extract_headings, resolve_body, scan_front_matter},
};
use notestat_ports::{ContentStore, DocumentMetadata, Logger, MetadataIndex, Notifier, PropertyStore, Renderer};
use notestat_shared_kernel::{DocumentId, InfrastructureError, Result};

#[derive(Default)]
pub struct StubContent {
    pub documents: Mutex<Vec<(DocumentId, String)>>,
    reads: AtomicUsize,
}

impl StubContent {
    pub fn with(documents: &[(&str, &str)]) -> Self {
        let documents = documents.iter().map(|(id, body)| (DocumentId::from(*id), (*body).to_string())).collect();
        Self { documents: Mutex::new(documents), reads: AtomicUsize::new(0) }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl ContentStore for StubContent {
    fn read_content(&self, document: &DocumentId) -> Result<String> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == document)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| {
                InfrastructureError::ContentUnavailable {
                    document: document.to_string(),
                    reason: "not found".into(),
                }
                .into()
            })
    }

    fn list_documents(&self) -> Result<Vec<DocumentId>> {
        Ok(self.documents.lock().unwrap().iter().map(|(id, _)| id.clone()).collect())
    }
}

/// Index that knows nothing; every lookup falls back to scanning.
#[derive(Default)]
pub struct EmptyIndex;

impl MetadataIndex for EmptyIndex {
    fn lookup(&self, _document: &DocumentId, _content: &str) -> Option<DocumentMetadata> {
        None
    }
}

/// Host-style index filled ahead of time from a content stub.
#[derive(Default)]
pub struct PrecomputedIndex {
    entries: HashMap<DocumentId, DocumentMetadata>,
}

impl PrecomputedIndex {
    pub fn from_content(content: &StubContent) -> Self {
        let mut index = Self::default();
        for (id, text) in content.documents.lock().unwrap().iter() {
            let front_matter = scan_front_matter(text);
            let offset = front_matter.map_or(0, |s| s.end_line + 1);
            let headings = extract_headings(&resolve_body(text, front_matter))
                .into_iter()
                .map(|h| HeadingPosition { level: h.level, start_line: h.line_number - 1 + offset })
                .collect();
            index.entries.insert(id.clone(), DocumentMetadata { front_matter, headings });
        }
        index
    }
}

impl MetadataIndex for PrecomputedIndex {
    fn lookup(&self, document: &DocumentId, _content: &str) -> Option<DocumentMetadata> {
        self.entries.get(document).cloned()
    }
}

/// Replaces every markdown marker character with nothing.
#[derive(Default)]
pub struct StripRenderer {
    pub fail: bool,
}

impl Renderer for StripRenderer {
    fn render_plain_text(&self, body: &str, document: &DocumentId) -> Result<String> {
        if self.fail {
            return Err(InfrastructureError::ContentUnavailable {
                document: document.to_string(),
                reason: "render failed".into(),
            }
            .into());
        }
        Ok(body.replace(['#', '*', '_', '`'], ""))
    }
}

#[derive(Default)]
pub struct RecordingProperties {
    pub writes: Mutex<Vec<(DocumentId, String, u64)>>,
    /// Property names whose writes are rejected.
    pub reject: Vec<String>,
}

impl RecordingProperties {
    pub fn rejecting(property: &str) -> Self {
        Self { reject: vec![property.to_string()], ..Self::default() }
    }

    pub fn written(&self) -> Vec<(String, String, u64)> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(doc, name, value)| (doc.to_string(), name.clone(), *value))
            .collect()
    }
}

impl PropertyStore for RecordingProperties {
    fn set_property(&self, document: &DocumentId, name: &str, value: u64) -> Result<()> {
        if self.reject.iter().any(|r| r == name) {
            return Err(InfrastructureError::PropertyWriteFailed {
                document: document.to_string(),
                property: name.to_string(),
                reason: "read-only".into(),
            }
            .into());
        }
        self.writes.lock().unwrap().push((document.clone(), name.to_string(), value));
        Ok(())
    }

    fn get_property(&self, document: &DocumentId, name: &str) -> Result<Option<u64>> {
        Ok(self
            .writes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(doc, n, _)| doc == document && n == name)
            .map(|(_, _, value)| *value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
    Progress(usize, usize),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) -> Result<()> {
        self.notices.lock().unwrap().push(Notice::Info(message.to_string()));
        Ok(())
    }

    fn error(&self, message: &str) -> Result<()> {
        self.notices.lock().unwrap().push(Notice::Error(message.to_string()));
        Ok(())
    }

    fn progress(&self, processed: usize, total: usize) -> Result<()> {
        self.notices.lock().unwrap().push(Notice::Progress(processed, total));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    pub lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn log(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}
