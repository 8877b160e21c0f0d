//! Data models for the parcel store.
//!
//! This module contains the core data structures:
//! - the delivery lifecycle `Status` enum
//! - the `Parcel` record and its stable `ParcelId`

pub mod parcel;
pub mod status;

// Re-exports for convenient access
pub use parcel::{Parcel, ParcelId};
pub use status::Status;
