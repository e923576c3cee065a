// crates/infra/src/filesystem.rs
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use notestat_ports::ContentStore;
use notestat_shared_kernel::{DocumentId, InfrastructureError, Result};

use crate::persistence::FileReader;

const DOCUMENT_EXTENSION: &str = "md";

/// Directories that never hold notes, even without a `.gitignore`.
const DEFAULT_PRUNE_DIRS: &[&str] = &["node_modules", "target", ".git", ".obsidian", ".trash"];

fn is_document(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

/// A directory of markdown notes.
///
/// Document ids are `/`-separated paths relative to the root, so the same vault
/// yields the same ids on every platform.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of `document` inside the vault.
    pub fn path_of(&self, document: &DocumentId) -> PathBuf {
        document.as_str().split('/').fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Map a filesystem path back to a document id; `None` outside the vault or
    /// for non-markdown files.
    pub fn document_for(&self, path: &Path) -> Option<DocumentId> {
        if !is_document(path) {
            return None;
        }
        let relative = path.strip_prefix(&self.root).ok()?;
        Some(DocumentId::from_relative_path(relative))
    }

    /// Resolve a user-supplied argument: either a vault-relative id or a path.
    pub fn resolve(&self, argument: &str) -> DocumentId {
        let candidate = Path::new(argument);
        if candidate.is_absolute() {
            if let Some(id) = self.document_for(candidate) {
                return id;
            }
        } else if let Ok(canonical_root) = self.root.canonicalize()
            && let Ok(canonical) = candidate.canonicalize()
            && let Ok(relative) = canonical.strip_prefix(&canonical_root)
        {
            return DocumentId::from_relative_path(relative);
        }
        DocumentId::from(argument.replace('\\', "/").trim_start_matches("./"))
    }

    fn walk(&self) -> Result<Vec<DocumentId>> {
        if !self.root.is_dir() {
            return Err(InfrastructureError::WalkError {
                root: self.root.clone(),
                details: "vault root is not a directory".to_string(),
            }
            .into());
        }

        let mut builder = WalkBuilder::new(&self.root);
        builder.hidden(true);
        builder.git_ignore(true);
        builder.git_exclude(true);
        builder.ignore(true);
        // `.git` が無いディレクトリでも .gitignore を尊重する
        builder.require_git(false);
        builder.filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && entry.file_name().to_str().is_some_and(|name| DEFAULT_PRUNE_DIRS.contains(&name)))
        });

        let mut documents = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable vault entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if let Some(id) = self.document_for(entry.path()) {
                documents.push(id);
            }
        }

        documents.sort();
        documents.dedup();
        Ok(documents)
    }
}

impl ContentStore for FsVault {
    fn read_content(&self, document: &DocumentId) -> Result<String> {
        let path = self.path_of(document);
        FileReader::read_text(&path).map_err(|err| {
            InfrastructureError::ContentUnavailable { document: document.to_string(), reason: err.to_string() }.into()
        })
    }

    fn list_documents(&self) -> Result<Vec<DocumentId>> {
        self.walk()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn ids(vault: &FsVault) -> Vec<String> {
        vault.list_documents().unwrap().into_iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn lists_markdown_files_sorted_and_relative() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::write(dir.path().join("z.md"), "z").unwrap();
        fs::write(dir.path().join("b/nested/a.MD"), "a").unwrap();
        fs::write(dir.path().join("b/image.png"), "x").unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();

        let vault = FsVault::new(dir.path());
        assert_eq!(ids(&vault), vec!["b/nested/a.MD", "z.md"]);
    }

    #[test]
    fn hidden_ignored_and_pruned_entries_are_skipped() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".obsidian")).unwrap();
        fs::create_dir_all(dir.path().join("drafts")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join(".obsidian/workspace.md"), "x").unwrap();
        fs::write(dir.path().join(".hidden.md"), "x").unwrap();
        fs::write(dir.path().join("drafts/wip.md"), "x").unwrap();
        fs::write(dir.path().join("node_modules/pkg/README.md"), "x").unwrap();
        fs::write(dir.path().join(".gitignore"), "drafts/\n").unwrap();
        fs::write(dir.path().join("keep.md"), "x").unwrap();

        assert_eq!(ids(&FsVault::new(dir.path())), vec!["keep.md"]);
    }

    #[test]
    fn reads_content_by_id() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/note.md"), "# Hi").unwrap();

        let vault = FsVault::new(dir.path());
        assert_eq!(vault.read_content(&DocumentId::from("sub/note.md")).unwrap(), "# Hi");
    }

    #[test]
    fn missing_document_is_content_unavailable() {
        let dir = tempdir().unwrap();
        let err = FsVault::new(dir.path()).read_content(&DocumentId::from("gone.md")).unwrap_err();
        assert!(err.to_string().contains("Content unavailable for 'gone.md'"));
    }

    #[test]
    fn missing_root_is_a_walk_error() {
        let dir = tempdir().unwrap();
        let vault = FsVault::new(dir.path().join("absent"));
        assert!(vault.list_documents().is_err());
    }

    #[test]
    fn document_for_maps_paths_back() {
        let dir = tempdir().unwrap();
        let vault = FsVault::new(dir.path());
        assert_eq!(vault.document_for(&dir.path().join("x/y.md")), Some(DocumentId::from("x/y.md")));
        assert_eq!(vault.document_for(&dir.path().join("x/y.txt")), None);
        assert_eq!(vault.document_for(Path::new("/elsewhere/y.md")), None);
    }

    #[test]
    fn resolve_accepts_ids_and_absolute_paths() {
        let dir = tempdir().unwrap();
        let vault = FsVault::new(dir.path());
        assert_eq!(vault.resolve("notes/a.md"), DocumentId::from("notes/a.md"));
        let absolute = dir.path().join("notes").join("b.md");
        assert_eq!(vault.resolve(absolute.to_str().unwrap()), DocumentId::from("notes/b.md"));
    }
}
