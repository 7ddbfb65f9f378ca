use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use taskdraft_core::{FileDescriptor, TaskdraftResult, UserRole};

use crate::store;

/// The single "resume point" record: enough context to rebuild a session's
/// system prompt without re-running setup. Distinct from any saved
/// transcript.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The role chosen during setup.
    pub role: UserRole,
    /// Repository reference string (not validated).
    pub repository: String,
    /// The attached task file, if any.
    #[serde(rename = "file_info", skip_serializing_if = "Option::is_none")]
    pub file: Option<FileDescriptor>,
    /// ISO-8601 save timestamp.
    pub timestamp: String,
}

// Deserialization goes through this shape so that a snapshot written as `{}`
// or missing its `role` reads back as "no snapshot" instead of an error.
#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    role: Option<UserRole>,
    #[serde(default)]
    repository: String,
    #[serde(rename = "file_info")]
    file: Option<FileDescriptor>,
    #[serde(default)]
    timestamp: String,
}

/// Store for the zero-or-one persisted [`SessionSnapshot`], backed by one
/// JSON document.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store over the JSON document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot, if a usable one exists.
    ///
    /// An absent file, an empty object, a document without a `role`, or a
    /// corrupt document all load as `None`; corruption is additionally
    /// warned about.
    pub fn load(&self) -> Option<SessionSnapshot> {
        let data = match store::read_document(&self.path) {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session snapshot unreadable");
                return None;
            }
        };
        let raw: RawSnapshot = match serde_json::from_str(&data) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session snapshot corrupt, ignoring");
                return None;
            }
        };
        let role = raw.role?;
        Some(SessionSnapshot {
            role,
            repository: raw.repository,
            file: raw.file,
            timestamp: raw.timestamp,
        })
    }

    /// Persists `snapshot`, replacing any previous one.
    pub fn save(&self, snapshot: &SessionSnapshot) -> TaskdraftResult<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        store::write_document(&self.path, &json)
    }

    /// Clears the snapshot by writing an empty object. The file keeps
    /// existing; a later [`SnapshotStore::load`] returns `None`.
    pub fn clear(&self) -> TaskdraftResult<()> {
        store::write_document(&self.path, "{}")
    }
}

impl SessionSnapshot {
    /// Builds a snapshot of the given session context stamped with the
    /// current time.
    pub fn now(role: UserRole, repository: impl Into<String>, file: Option<FileDescriptor>) -> Self {
        Self {
            role,
            repository: repository.into(),
            file,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
