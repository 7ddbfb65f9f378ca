//! Document ingestion for TaskDraft.
//!
//! Given a file path, [`Ingestor::extract`] returns the extracted text plus a
//! [`FileDescriptor`], or a typed error. The supported formats are a fixed
//! set keyed by extension ([`DocumentKind`]); actual content extraction is
//! behind the [`DocumentReader`] trait so binary-format readers (PDF, Word)
//! can be plugged in without touching this crate. Out of the box only the
//! plain-text reader is registered.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use taskdraft_core::{FileDescriptor, TaskdraftError, TaskdraftResult};

/// A supported document format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `.txt` and `.md` — read as UTF-8 text.
    PlainText,
    /// `.pdf` — requires an external reader.
    Pdf,
    /// `.doc` and `.docx` — requires an external reader.
    Word,
}

impl DocumentKind {
    /// Maps a lowercased extension (including the leading dot) to a kind.
    ///
    /// Returns `None` for extensions outside the supported set.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".txt" | ".md" => Some(DocumentKind::PlainText),
            ".pdf" => Some(DocumentKind::Pdf),
            ".doc" | ".docx" => Some(DocumentKind::Word),
            _ => None,
        }
    }
}

/// Extracts text from a document of one specific [`DocumentKind`].
pub trait DocumentReader: Send + Sync {
    /// Reads the file at `path` and returns its textual content.
    fn read(&self, path: &Path) -> TaskdraftResult<String>;
}

/// Reader for [`DocumentKind::PlainText`] files.
pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn read(&self, path: &Path) -> TaskdraftResult<String> {
        std::fs::read_to_string(path)
            .map_err(|e| TaskdraftError::ReadFailure(e.to_string()))
    }
}

/// The result of a successful extraction.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// The extracted text.
    pub text: String,
    /// Metadata describing the source file.
    pub descriptor: FileDescriptor,
}

/// The ingestion adapter: a registry of readers keyed by document kind.
pub struct Ingestor {
    readers: HashMap<DocumentKind, Box<dyn DocumentReader>>,
}

impl Ingestor {
    /// Creates an ingestor with no readers registered.
    pub fn new() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }

    /// Creates an ingestor with the built-in plain-text reader registered.
    pub fn with_builtin_readers() -> Self {
        let mut ingestor = Self::new();
        ingestor.register(DocumentKind::PlainText, Box::new(PlainTextReader));
        ingestor
    }

    /// Registers (or replaces) the reader for `kind`.
    pub fn register(&mut self, kind: DocumentKind, reader: Box<dyn DocumentReader>) {
        self.readers.insert(kind, reader);
    }

    /// Extracts the text of the file at `path`.
    ///
    /// Fails with [`TaskdraftError::FileNotFound`] if the path does not
    /// exist, [`TaskdraftError::UnsupportedType`] if the extension is outside
    /// the supported set, and [`TaskdraftError::ReadFailure`] if extraction
    /// itself fails (including a supported kind with no registered reader).
    /// All of these are recoverable; the caller re-prompts.
    pub fn extract(&self, path: &Path) -> TaskdraftResult<ExtractedDocument> {
        if !path.exists() {
            return Err(TaskdraftError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        if ext.is_empty() {
            return Err(TaskdraftError::UnsupportedType(
                "file has no extension".to_string(),
            ));
        }
        let kind = DocumentKind::from_extension(&ext)
            .ok_or_else(|| TaskdraftError::UnsupportedType(ext.clone()))?;

        let reader = self.readers.get(&kind).ok_or_else(|| {
            TaskdraftError::ReadFailure(format!("no reader available for {ext} files"))
        })?;

        let text = reader.read(path)?;
        tracing::debug!(path = %path.display(), chars = text.len(), "document extracted");

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let descriptor = FileDescriptor {
            path: path.display().to_string(),
            name,
            size: text.chars().count(),
            kind: ext,
        };
        Ok(ExtractedDocument { text, descriptor })
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::with_builtin_readers()
    }
}

/// Normalizes a user-entered path: strips surrounding quotes and expands a
/// leading `~` to the home directory.
pub fn expand_path(input: &str) -> PathBuf {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'');
    if let Some(rest) = trimmed.strip_prefix('~') {
        if let Some(home) = std::env::var_os("HOME") {
            let mut path = PathBuf::from(home);
            path.push(rest.trim_start_matches('/'));
            return path;
        }
    }
    PathBuf::from(trimmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extracts_plain_text_with_descriptor() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("notes.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "add pagination").unwrap();

        let doc = Ingestor::with_builtin_readers().extract(&path).unwrap();
        assert_eq!(doc.text, "add pagination");
        assert_eq!(doc.descriptor.name, "notes.txt");
        assert_eq!(doc.descriptor.kind, ".txt");
        assert_eq!(doc.descriptor.size, "add pagination".chars().count());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Ingestor::with_builtin_readers()
            .extract(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, TaskdraftError::FileNotFound(_)));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("image.png");
        std::fs::write(&path, b"not text").unwrap();

        let err = Ingestor::with_builtin_readers().extract(&path).unwrap_err();
        match err {
            TaskdraftError::UnsupportedType(ext) => assert_eq!(ext, ".png"),
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn extensionless_path_gets_a_clear_diagnostic() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("README");
        std::fs::write(&path, b"plain text, no extension").unwrap();

        let err = Ingestor::with_builtin_readers().extract(&path).unwrap_err();
        match err {
            TaskdraftError::UnsupportedType(detail) => {
                assert_eq!(detail, "file has no extension");
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn supported_kind_without_reader_is_read_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("spec.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        // No PDF reader registered by default.
        let err = Ingestor::with_builtin_readers().extract(&path).unwrap_err();
        assert!(matches!(err, TaskdraftError::ReadFailure(_)));
    }

    #[test]
    fn expand_path_strips_quotes() {
        assert_eq!(
            expand_path("\"/tmp/a file.txt\""),
            PathBuf::from("/tmp/a file.txt")
        );
        assert_eq!(expand_path("'/tmp/x.md'"), PathBuf::from("/tmp/x.md"));
    }
}
