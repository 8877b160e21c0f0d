//! Delivery lifecycle statuses.
//!
//! The four statuses are a fixed, closed, ordered set; each one owns a
//! partition in the store and a pair of human-readable titles.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    New,
    Dispatched,
    ForPickup,
    Delivered,
}

impl Status {
    /// All statuses in display order. Drives section ordering in callers.
    pub const ALL: [Status; 4] = [
        Status::New,
        Status::Dispatched,
        Status::ForPickup,
        Status::Delivered,
    ];

    /// Title shown on a single parcel's detail view.
    pub fn title(&self) -> &'static str {
        match self {
            Status::New => "New Parcel",
            Status::Dispatched => "In Transit",
            Status::ForPickup => "Awaiting Collection",
            Status::Delivered => "Parcel Delivered",
        }
    }

    /// Header for the list section that groups parcels of this status.
    pub fn section_title(&self) -> &'static str {
        match self {
            Status::New => "New Parcels",
            Status::Dispatched => "Dispatched Parcels",
            Status::ForPickup => "Parcels for Pick Up",
            Status::Delivered => "Delivered Parcels",
        }
    }

    /// Whether a parcel currently at this status may be reassigned to `next`.
    ///
    /// A new parcel can go anywhere; once a parcel has left `New` it never
    /// returns. Re-selecting the current status is allowed. This is advice
    /// for status pickers, not something the store enforces.
    pub fn can_transition_to(&self, next: Status) -> bool {
        match self {
            Status::New => true,
            _ => next != Status::New,
        }
    }
}
