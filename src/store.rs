//! The parcel store: four status partitions and the operations over them.
//!
//! The store exclusively owns every parcel. Callers read partitions through
//! `list`, hold ids across renders, and route every mutation back through a
//! store method; each relocating method restamps the parcel's status, so a
//! parcel's field and its partition can never disagree.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::{Parcel, ParcelId, Status};
use crate::storage;

/// The four ordered partitions, one per status. This is exactly the shape
/// that gets serialized into the snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Partitions {
    new: Vec<Parcel>,
    dispatched: Vec<Parcel>,
    for_pickup: Vec<Parcel>,
    delivered: Vec<Parcel>,
}

impl Partitions {
    fn get(&self, status: Status) -> &Vec<Parcel> {
        match status {
            Status::New => &self.new,
            Status::Dispatched => &self.dispatched,
            Status::ForPickup => &self.for_pickup,
            Status::Delivered => &self.delivered,
        }
    }

    fn get_mut(&mut self, status: Status) -> &mut Vec<Parcel> {
        match status {
            Status::New => &mut self.new,
            Status::Dispatched => &mut self.dispatched,
            Status::ForPickup => &mut self.for_pickup,
            Status::Delivered => &mut self.delivered,
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.new.len() + self.dispatched.len() + self.for_pickup.len() + self.delivered.len()
    }
}

/// Owner of all parcel data, bound to the snapshot file it persists to.
#[derive(Debug)]
pub struct ParcelStore {
    partitions: Partitions,
    snapshot_path: PathBuf,
}

impl ParcelStore {
    /// An empty store bound to `path`. Nothing is read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ParcelStore {
            partitions: Partitions::default(),
            snapshot_path: path.into(),
        }
    }

    /// A store seeded with one sample parcel per status, used when no
    /// snapshot exists yet.
    pub fn with_sample_parcels(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        let now = Utc::now();

        let mut parcel = Parcel::new();
        parcel.recipient_name = "John Snow".to_string();
        parcel.delivery_address = "Castle Black".to_string();
        parcel.notes = "The White Wolf".to_string();
        store.append(parcel, Status::New);

        let mut parcel = Parcel::new();
        parcel.recipient_name = "Daenerys Targaryen".to_string();
        parcel.delivery_address = "Dragonstone".to_string();
        parcel.notes = "The Mother of Dragons".to_string();
        parcel.tracking_number = Some("F2J24".to_string());
        parcel.delivery_date = Some(now);
        store.append(parcel, Status::Dispatched);

        let mut parcel = Parcel::new();
        parcel.recipient_name = "Tyrion Lannister".to_string();
        parcel.delivery_address = "Casterly Rock".to_string();
        parcel.notes = "The Little Lion".to_string();
        parcel.tracking_number = Some("AGQH6".to_string());
        parcel.delivery_date = Some(now);
        store.append(parcel, Status::ForPickup);

        let mut parcel = Parcel::new();
        parcel.recipient_name = "Tormund Giantsbane".to_string();
        parcel.delivery_address = "Beyond the wall".to_string();
        parcel.notes = "Free Folk".to_string();
        parcel.tracking_number = Some("V55DI".to_string());
        parcel.delivery_date = Some(now);
        store.append(parcel, Status::Delivered);

        store
    }

    /// Decode a previously saved snapshot.
    ///
    /// `Ok(None)` means no snapshot file exists (an expected first-run
    /// outcome). A file that exists but cannot be read or decoded is an
    /// error, never `None`, so corruption is not mistaken for a first run.
    pub fn load_snapshot(path: impl Into<PathBuf>) -> Result<Option<Self>, StoreError> {
        let path = path.into();
        Ok(storage::read_snapshot(&path)?.map(|partitions| {
            debug!(parcels = partitions.total(), path = %path.display(), "loaded snapshot");
            ParcelStore {
                partitions,
                snapshot_path: path,
            }
        }))
    }

    /// Load the snapshot at `path`, falling back to sample parcels when no
    /// snapshot exists. Read failures and corrupt snapshots are propagated;
    /// the caller decides whether to discard the file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match Self::load_snapshot(path.clone())? {
            Some(store) => Ok(store),
            None => {
                info!(path = %path.display(), "no snapshot found, seeding sample parcels");
                Ok(Self::with_sample_parcels(path))
            }
        }
    }

    /// Serialize all four partitions to the snapshot path, overwriting any
    /// previous snapshot.
    pub fn save_snapshot(&self) -> Result<(), StoreError> {
        storage::write_snapshot(&self.snapshot_path, &self.partitions)?;
        debug!(
            parcels = self.parcel_count(),
            path = %self.snapshot_path.display(),
            "wrote snapshot"
        );
        Ok(())
    }

    /// Where this store persists its snapshot.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// The live partition for `status`, in display order.
    pub fn list(&self, status: Status) -> &[Parcel] {
        self.partitions.get(status)
    }

    /// Total number of parcels across all four partitions.
    pub fn parcel_count(&self) -> usize {
        self.partitions.total()
    }

    /// Append a fresh draft to the `New` partition and return it.
    pub fn create_draft(&mut self) -> &Parcel {
        self.append(Parcel::new(), Status::New);
        let new = self.partitions.get(Status::New);
        &new[new.len() - 1]
    }

    /// Insert `parcel` into the `status` partition, at `index` when given,
    /// otherwise at the end. The parcel's status field is restamped to match
    /// the partition it lands in.
    pub fn insert(
        &mut self,
        parcel: Parcel,
        status: Status,
        index: Option<usize>,
    ) -> Result<(), StoreError> {
        match index {
            None => self.append(parcel, status),
            Some(index) => {
                let partition = self.partitions.get_mut(status);
                if index > partition.len() {
                    return Err(StoreError::IndexOutOfBounds {
                        status,
                        index,
                        len: partition.len(),
                    });
                }
                let mut parcel = parcel;
                parcel.set_status(status);
                partition.insert(index, parcel);
            }
        }
        Ok(())
    }

    /// Remove and return the parcel at `index` in the `status` partition.
    pub fn remove(&mut self, status: Status, index: usize) -> Result<Parcel, StoreError> {
        let partition = self.partitions.get_mut(status);
        if index >= partition.len() {
            return Err(StoreError::IndexOutOfBounds {
                status,
                index,
                len: partition.len(),
            });
        }
        Ok(partition.remove(index))
    }

    /// Relocate the parcel at `(from, from_index)` to `(to, to_index)`.
    ///
    /// Both positions are validated before anything is mutated, so a failed
    /// move leaves the store untouched. The moved parcel's status field is
    /// restamped to `to`; its status-change date is left alone (that is
    /// [`change_status`](Self::change_status)'s job).
    pub fn move_parcel(
        &mut self,
        from: Status,
        from_index: usize,
        to: Status,
        to_index: usize,
    ) -> Result<(), StoreError> {
        let from_len = self.partitions.get(from).len();
        if from_index >= from_len {
            return Err(StoreError::IndexOutOfBounds {
                status: from,
                index: from_index,
                len: from_len,
            });
        }
        // the destination shrinks by one when moving within a partition
        let to_len = if from == to {
            from_len - 1
        } else {
            self.partitions.get(to).len()
        };
        if to_index > to_len {
            return Err(StoreError::IndexOutOfBounds {
                status: to,
                index: to_index,
                len: to_len,
            });
        }

        let mut parcel = self.partitions.get_mut(from).remove(from_index);
        parcel.set_status(to);
        self.partitions.get_mut(to).insert(to_index, parcel);
        Ok(())
    }

    /// Reassign a parcel to a new status in one step: remove it from its
    /// current partition, stamp the status and `status_changed_date`, and
    /// append it to the end of the destination partition.
    pub fn change_status(
        &mut self,
        id: ParcelId,
        to: Status,
        changed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let (from, index) = self.locate(id).ok_or(StoreError::ParcelNotFound(id))?;
        let mut parcel = self.partitions.get_mut(from).remove(index);
        parcel.set_status(to);
        parcel.status_changed_date = changed_at;
        self.partitions.get_mut(to).push(parcel);
        Ok(())
    }

    /// Current partition and position of the parcel with `id`.
    pub fn locate(&self, id: ParcelId) -> Option<(Status, usize)> {
        for status in Status::ALL {
            if let Some(index) = self
                .partitions
                .get(status)
                .iter()
                .position(|parcel| parcel.id() == id)
            {
                return Some((status, index));
            }
        }
        None
    }

    /// The parcel with `id`, wherever it currently lives.
    pub fn get(&self, id: ParcelId) -> Option<&Parcel> {
        let (status, index) = self.locate(id)?;
        Some(&self.partitions.get(status)[index])
    }

    /// Mutable access to the parcel with `id`. The status field stays under
    /// store control, so this cannot break partition membership.
    pub fn get_mut(&mut self, id: ParcelId) -> Option<&mut Parcel> {
        let (status, index) = self.locate(id)?;
        Some(&mut self.partitions.get_mut(status)[index])
    }

    fn append(&mut self, mut parcel: Parcel, status: Status) {
        parcel.set_status(status);
        self.partitions.get_mut(status).push(parcel);
    }
}
