use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use taskdraft_core::{TaskdraftError, TaskdraftResult};

use crate::store;

/// One record per saved transcript.
///
/// Entries accumulate in insertion order, are never deduplicated, and may
/// reference transcript files that no longer exist on disk; the catalog and
/// the filesystem are not kept transactionally consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportEntry {
    /// Generated export filename, unique per save.
    pub filename: String,
    /// The user-supplied name after sanitization.
    pub original_name: String,
    /// ISO-8601 export timestamp.
    pub date: String,
    /// Human-readable role label at export time.
    #[serde(rename = "user_type")]
    pub role_label: String,
    /// Repository reference at export time.
    pub repository: String,
    /// Absolute/expanded path of the transcript document.
    pub file_path: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    exports: Vec<ExportEntry>,
}

/// The export catalog: an ordered list of [`ExportEntry`] records backed by
/// one JSON document (`{ "exports": [...] }`).
///
/// Every mutation is a whole-document read-modify-write; single-process
/// access is assumed.
pub struct ExportCatalog {
    path: PathBuf,
}

impl ExportCatalog {
    /// Creates a catalog over the JSON document at `path`. The file is not
    /// created until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all entries in insertion order.
    ///
    /// An absent, unreadable, or corrupt document degrades to an empty list
    /// with a warning; listing never fails.
    pub fn list(&self) -> Vec<ExportEntry> {
        self.read_or_empty().exports
    }

    /// Appends `entry` at the end and persists the full document.
    pub fn append(&self, entry: ExportEntry) -> TaskdraftResult<()> {
        let mut doc = self.read_or_empty();
        doc.exports.push(entry);
        self.write(&doc)
    }

    /// Removes the first entry structurally equal to `entry` and persists.
    /// Removing an entry that is not present is a no-op.
    pub fn remove(&self, entry: &ExportEntry) -> TaskdraftResult<()> {
        let mut doc = self.read_or_empty();
        if let Some(pos) = doc.exports.iter().position(|e| e == entry) {
            doc.exports.remove(pos);
            self.write(&doc)?;
        }
        Ok(())
    }

    fn read_or_empty(&self) -> CatalogDocument {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "export catalog unreadable, starting over empty");
            CatalogDocument::default()
        })
    }

    fn read(&self) -> TaskdraftResult<CatalogDocument> {
        match store::read_document(&self.path)? {
            Some(data) => serde_json::from_str(&data).map_err(|e| {
                TaskdraftError::Persistence(format!("corrupt export catalog: {e}"))
            }),
            None => Ok(CatalogDocument::default()),
        }
    }

    fn write(&self, doc: &CatalogDocument) -> TaskdraftResult<()> {
        let json = serde_json::to_string_pretty(doc)?;
        store::write_document(&self.path, &json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn entry(name: &str) -> ExportEntry {
        ExportEntry {
            filename: format!("{name}_20260101_120000.md"),
            original_name: name.to_string(),
            date: "2026-01-01T12:00:00Z".to_string(),
            role_label: "Developer".to_string(),
            repository: "https://example.com/r".to_string(),
            file_path: format!("/tmp/exports/{name}_20260101_120000.md"),
        }
    }

    #[test]
    fn append_puts_entry_last() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = ExportCatalog::new(tmp.path().join("exports.json"));

        catalog.append(entry("first")).unwrap();
        catalog.append(entry("second")).unwrap();

        let entries = catalog.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].original_name, "second");
    }

    #[test]
    fn list_of_absent_store_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = ExportCatalog::new(tmp.path().join("missing.json"));
        assert!(catalog.list().is_empty());
    }

    #[test]
    fn corrupt_store_degrades_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("exports.json");
        std::fs::write(&path, "{not json").unwrap();
        let catalog = ExportCatalog::new(path);
        assert!(catalog.list().is_empty());
    }

    #[test]
    fn remove_takes_first_structural_match() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = ExportCatalog::new(tmp.path().join("exports.json"));

        catalog.append(entry("dup")).unwrap();
        catalog.append(entry("dup")).unwrap();
        catalog.append(entry("other")).unwrap();

        catalog.remove(&entry("dup")).unwrap();
        let entries = catalog.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].original_name, "dup");
        assert_eq!(entries[1].original_name, "other");
    }

    #[test]
    fn remove_of_absent_entry_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = ExportCatalog::new(tmp.path().join("exports.json"));
        catalog.append(entry("only")).unwrap();
        catalog.remove(&entry("missing")).unwrap();
        assert_eq!(catalog.list().len(), 1);
    }

    #[test]
    fn wire_format_uses_user_type_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("exports.json");
        let catalog = ExportCatalog::new(&path);
        catalog.append(entry("wire")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["exports"][0]["user_type"], "Developer");
        assert!(raw["exports"][0].get("role_label").is_none());
    }
}
