// crates/infra/src/index.rs
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use notestat_domain::{
    HeadingPosition,
    analysis::{extract_body, extract_headings, scan_front_matter},
};
use notestat_ports::{ContentHasher, DocumentMetadata, HashValue, MetadataIndex};
use notestat_shared_kernel::DocumentId;
use xxhash_rust::xxh3::xxh3_128;

/// XXH3-128 content fingerprint.
#[derive(Debug, Default, Clone, Copy)]
pub struct Xxh3Hasher;

impl ContentHasher for Xxh3Hasher {
    fn hash_bytes(&self, data: &[u8]) -> HashValue {
        HashValue(xxh3_128(data))
    }
}

#[derive(Debug, Clone)]
struct Entry {
    hash: HashValue,
    metadata: DocumentMetadata,
}

fn scan(content: &str) -> DocumentMetadata {
    let front_matter = scan_front_matter(content);
    // 見出しの行番号はドキュメント全体基準に戻す
    let offset = front_matter.map_or(0, |s| s.end_line + 1);
    let body = extract_body(content, front_matter);
    let headings = extract_headings(&body)
        .into_iter()
        .map(|h| HeadingPosition { level: h.level, start_line: h.line_number - 1 + offset })
        .collect();
    DocumentMetadata { front_matter, headings }
}

/// Metadata index that scans the content it is handed.
///
/// Entries are cached per document and reused while the content hash is unchanged,
/// so a lookup never mixes metadata from another version of the file.
pub struct ScanningMetadataIndex<'a> {
    hasher: &'a dyn ContentHasher,
    cache: Mutex<HashMap<DocumentId, Entry>>,
}

impl<'a> ScanningMetadataIndex<'a> {
    pub fn new(hasher: &'a dyn ContentHasher) -> Self {
        Self { hasher, cache: Mutex::new(HashMap::new()) }
    }

    /// Keep only the entries whose document satisfies `keep`; returns how many were dropped.
    pub fn retain<F>(&self, mut keep: F) -> usize
    where
        F: FnMut(&DocumentId) -> bool,
    {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let before = cache.len();
        cache.retain(|document, _| keep(document));
        before - cache.len()
    }

    pub fn cached_documents(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl MetadataIndex for ScanningMetadataIndex<'_> {
    fn lookup(&self, document: &DocumentId, content: &str) -> Option<DocumentMetadata> {
        let hash = self.hasher.hash_bytes(content.as_bytes());

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = cache.get(document)
            && entry.hash == hash
        {
            return Some(entry.metadata.clone());
        }

        log::trace!("{document}: indexing (hash {hash})");
        let metadata = scan(content);
        cache.insert(document.clone(), Entry { hash, metadata: metadata.clone() });
        Some(metadata)
    }
}
