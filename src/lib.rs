//! Status-partitioned parcel tracking with local snapshot persistence.
//!
//! A [`ParcelStore`] owns every [`Parcel`], grouped into one ordered
//! partition per [`Status`]. All mutations go through the store, so a
//! parcel's status field always matches the partition holding it, and the
//! whole store can be written to and reloaded from a single JSON snapshot
//! file whenever the caller chooses.
//!
//! ```no_run
//! use parcel_store::{ParcelStore, Status};
//!
//! # fn main() -> Result<(), parcel_store::StoreError> {
//! let path = parcel_store::default_snapshot_path()
//!     .unwrap_or_else(|| "parcels.json".into());
//! let mut store = ParcelStore::open(path)?;
//!
//! let id = store.create_draft().id();
//! if let Some(draft) = store.get_mut(id) {
//!     draft.recipient_name = "Samwell Tarly".to_string();
//!     draft.delivery_address = "The Citadel, Oldtown".to_string();
//! }
//! store.save_snapshot()?;
//!
//! for parcel in store.list(Status::New) {
//!     println!("{}: {}", parcel.recipient_name, parcel.delivery_address);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use error::StoreError;
pub use models::{Parcel, ParcelId, Status};
pub use storage::{SNAPSHOT_FILE_NAME, default_snapshot_path};
pub use store::ParcelStore;
