//! Snapshot files: where they live and how they are read and written.
//!
//! A snapshot is the JSON encoding of all four partitions in one file,
//! rewritten whole on every save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::store::Partitions;

/// File name of the snapshot inside its data directory.
pub const SNAPSHOT_FILE_NAME: &str = "parcels.json";

/// Conventional per-user snapshot location, under the platform's local data
/// directory. `None` when the platform exposes no such directory; callers
/// there must supply their own path.
pub fn default_snapshot_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("parcel-store").join(SNAPSHOT_FILE_NAME))
}

/// Read and decode the snapshot at `path`. A missing file is `Ok(None)`;
/// any other read failure, and any decode failure, is an error.
pub(crate) fn read_snapshot(path: &Path) -> Result<Option<Partitions>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot file");
            return Ok(None);
        }
        Err(source) => {
            return Err(StoreError::ReadSnapshot {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let partitions = serde_json::from_str(&raw).map_err(|source| StoreError::CorruptSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(partitions))
}

/// Encode `partitions` and overwrite the file at `path`, creating parent
/// directories as needed.
pub(crate) fn write_snapshot(path: &Path, partitions: &Partitions) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::WriteSnapshot {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    let json =
        serde_json::to_string_pretty(partitions).map_err(|source| StoreError::WriteSnapshot {
            path: path.to_path_buf(),
            source: source.into(),
        })?;
    fs::write(path, json).map_err(|source| StoreError::WriteSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::store::ParcelStore;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_round_trips_every_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE_NAME);

        let mut store = ParcelStore::with_sample_parcels(&path);
        store.get_mut(store.list(Status::New)[0].id()).unwrap().notes =
            "fragile, this side up".to_string();
        store.save_snapshot().unwrap();

        let loaded = ParcelStore::load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded.parcel_count(), store.parcel_count());
        for status in Status::ALL {
            let before = store.list(status);
            let after = loaded.list(status);
            assert_eq!(before.len(), after.len());
            for (original, restored) in before.iter().zip(after) {
                assert_eq!(original.id(), restored.id());
                assert_eq!(original.status(), restored.status());
                assert_eq!(original.recipient_name, restored.recipient_name);
                assert_eq!(original.delivery_address, restored.delivery_address);
                assert_eq!(original.tracking_number, restored.tracking_number);
                assert_eq!(original.notes, restored.notes);
                assert_eq!(original.status_changed_date, restored.status_changed_date);
                assert_eq!(original.delivery_date, restored.delivery_date);
            }
        }
    }

    #[test]
    fn test_missing_snapshot_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE_NAME);

        assert!(read_snapshot(&path).unwrap().is_none());
        assert!(ParcelStore::load_snapshot(&path).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error_not_a_fresh_start() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let err = ParcelStore::load_snapshot(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptSnapshot { .. }));
        assert!(!err.is_precondition());
        assert!(ParcelStore::open(&path).is_err());
    }

    #[test]
    fn test_open_seeds_samples_when_no_snapshot_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE_NAME);

        let store = ParcelStore::open(&path).unwrap();
        assert_eq!(store.parcel_count(), 4);
        assert_eq!(store.snapshot_path(), path);
        // seeding is in-memory only until the caller saves
        assert!(!path.exists());
    }

    #[test]
    fn test_open_prefers_an_existing_snapshot_over_samples() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE_NAME);

        let mut store = ParcelStore::open(&path).unwrap();
        let draft = store.create_draft().id();
        store.save_snapshot().unwrap();

        let reopened = ParcelStore::open(&path).unwrap();
        assert_eq!(reopened.parcel_count(), 5);
        assert_eq!(reopened.locate(draft), Some((Status::New, 1)));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join(SNAPSHOT_FILE_NAME);

        let store = ParcelStore::new(&path);
        store.save_snapshot().unwrap();

        assert!(path.exists());
        let loaded = ParcelStore::load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded.parcel_count(), 0);
    }

    #[test]
    fn test_default_snapshot_path_shape() {
        if let Some(path) = default_snapshot_path() {
            assert!(path.ends_with(Path::new("parcel-store").join(SNAPSHOT_FILE_NAME)));
        }
    }
}
