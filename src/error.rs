//! Error types for store operations.
//!
//! Two families: precondition violations (bad index, unknown parcel id),
//! which indicate a caller bug and are surfaced instead of crashing, and
//! persistence failures around the snapshot file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{ParcelId, Status};

/// Error returned by [`ParcelStore`](crate::ParcelStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An explicit index was outside the valid range for a partition.
    #[error("index {index} is out of bounds for the {status:?} partition of length {len}")]
    IndexOutOfBounds {
        status: Status,
        index: usize,
        len: usize,
    },

    /// An id-based operation named a parcel that is not in any partition.
    #[error("no parcel with id {0}")]
    ParcelNotFound(ParcelId),

    /// The snapshot file could not be written.
    #[error("failed to write snapshot to {}", .path.display())]
    WriteSnapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot file exists but could not be read.
    #[error("failed to read snapshot from {}", .path.display())]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot file exists but does not decode. Distinct from the
    /// missing-file case so callers never mistake corruption for a first run.
    #[error("snapshot at {} is corrupt", .path.display())]
    CorruptSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// True for the caller-bug family (bad index, unknown id) as opposed to
    /// snapshot I/O failures.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            StoreError::IndexOutOfBounds { .. } | StoreError::ParcelNotFound(_)
        )
    }
}
