//! File locator: the id is the first line of a small text file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shared_types::ObjectId;
use tracing::debug;

use crate::ports::{parse_stored, LocatorError, ObjectLocator};

/// Stores the object id in a file.
#[derive(Debug, Clone)]
pub struct FileLocator {
    path: PathBuf,
}

impl FileLocator {
    /// Locator backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ObjectLocator for FileLocator {
    fn load(&self) -> Result<Option<ObjectId>, LocatorError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => parse_stored(contents.lines().next().unwrap_or_default()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, object_id: &ObjectId) -> Result<(), LocatorError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{}\n", object_id))?;
        debug!(path = %self.path.display(), object_id = %object_id, "Locator saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), LocatorError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let locator = FileLocator::new(dir.path().join("object"));
        assert!(locator.load().unwrap().is_none());
        // Clearing a missing file is fine too.
        locator.clear().unwrap();
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let locator = FileLocator::new(dir.path().join("nested").join("object"));
        let id = ObjectId::from_bytes([3; 32]);

        locator.save(&id).unwrap();
        assert_eq!(FileLocator::new(locator.path()).load().unwrap(), Some(id));

        locator.clear().unwrap();
        assert!(!locator.path().exists());
    }

    #[test]
    fn test_malformed_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("object");
        fs::write(&path, "not-an-id\n").unwrap();
        assert!(matches!(
            FileLocator::new(path).load(),
            Err(LocatorError::Malformed { .. })
        ));
    }
}
