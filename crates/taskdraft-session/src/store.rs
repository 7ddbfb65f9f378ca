//! Shared file helpers for the JSON-backed stores.

use std::path::Path;

use taskdraft_core::{TaskdraftError, TaskdraftResult};

/// Reads the document at `path`, returning `None` if it does not exist.
pub(crate) fn read_document(path: &Path) -> TaskdraftResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TaskdraftError::Persistence(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}

/// Replaces the document at `path` atomically: the content is written to a
/// temp file in the same directory and renamed over the target, so readers
/// never observe a partial write.
pub(crate) fn write_document(path: &Path, contents: &str) -> TaskdraftResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        TaskdraftError::Persistence(format!("failed to create {}: {e}", dir.display()))
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    let tmp = dir.join(format!(".{file_name}.tmp"));

    std::fs::write(&tmp, contents).map_err(|e| {
        TaskdraftError::Persistence(format!("failed to write {}: {e}", tmp.display()))
    })?;
    std::fs::rename(&tmp, path).map_err(|e| {
        TaskdraftError::Persistence(format!("failed to replace {}: {e}", path.display()))
    })?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let got = read_document(&tmp.path().join("absent.json")).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("doc.json");
        write_document(&path, "{\"a\":1}").unwrap();
        assert_eq!(read_document(&path).unwrap().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doc.json");
        write_document(&path, "{}").unwrap();
        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("doc.json")]);
    }
}
