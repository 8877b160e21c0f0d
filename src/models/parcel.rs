//! The parcel record and its helpers.
//!
//! A parcel is a plain data holder; which partition it lives in is owned by
//! the store. The `status` field is private so the two can never disagree:
//! only store operations relocate a parcel, and they restamp the field as
//! they do it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::Status;

/// Characters a tracking number is drawn from.
const TRACKING_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated tracking number.
const TRACKING_NUMBER_LEN: usize = 5;

/// Stable identity of a parcel, independent of its position in any partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelId(Uuid);

impl ParcelId {
    pub fn new() -> Self {
        ParcelId(Uuid::new_v4())
    }
}

impl Default for ParcelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single shipment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    id: ParcelId,
    pub recipient_name: String,
    pub delivery_address: String,
    status: Status,
    /// 5-character code, `None` until one is assigned.
    pub tracking_number: Option<String>,
    pub notes: String,
    /// Stamped whenever the status changes.
    pub status_changed_date: DateTime<Utc>,
    /// `None` while the parcel is still `New`.
    pub delivery_date: Option<DateTime<Utc>>,
}

impl Parcel {
    /// A draft parcel: status `New`, empty fields, status-change date of now.
    pub fn new() -> Self {
        Parcel {
            id: ParcelId::new(),
            recipient_name: String::new(),
            delivery_address: String::new(),
            status: Status::New,
            tracking_number: None,
            notes: String::new(),
            status_changed_date: Utc::now(),
            delivery_date: None,
        }
    }

    pub fn id(&self) -> ParcelId {
        self.id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Only the store relocates parcels, so only the store restamps this.
    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Whether the record has every field required to be saved at `status`.
    ///
    /// Recipient name and delivery address are always required; any status
    /// past `New` also needs a tracking number and a delivery date.
    pub fn is_complete_for(&self, status: Status) -> bool {
        let has_basics =
            !self.recipient_name.is_empty() && !self.delivery_address.is_empty();
        match status {
            Status::New => has_basics,
            _ => {
                has_basics
                    && self.tracking_number.as_deref().is_some_and(|t| !t.is_empty())
                    && self.delivery_date.is_some()
            }
        }
    }

    /// Produce a 5-character tracking number from `A-Z0-9`.
    ///
    /// Each character is drawn independently and uniformly; there is no
    /// collision checking across calls.
    pub fn generate_tracking_number() -> String {
        use rand::Rng;

        let mut rng = rand::rng();
        (0..TRACKING_NUMBER_LEN)
            .map(|_| TRACKING_ALPHABET[rng.random_range(0..TRACKING_ALPHABET.len())] as char)
            .collect()
    }

    /// Date format used on a parcel's detail view, e.g. `Oct 5, 2018 at 3:04 PM`.
    pub fn format_detail_date(date: DateTime<Utc>) -> String {
        date.format("%b %-d, %Y at %-I:%M %p").to_string()
    }

    /// Compact date format used in list rows, e.g. `10/5/18, 3:04 PM`.
    pub fn format_list_date(date: DateTime<Utc>) -> String {
        date.format("%-m/%-d/%y, %-I:%M %p").to_string()
    }
}

impl Default for Parcel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_parcel_defaults() {
        let parcel = Parcel::new();
        assert_eq!(parcel.status(), Status::New);
        assert!(parcel.recipient_name.is_empty());
        assert!(parcel.delivery_address.is_empty());
        assert!(parcel.tracking_number.is_none());
        assert!(parcel.notes.is_empty());
        assert!(parcel.delivery_date.is_none());
    }

    #[test]
    fn test_each_parcel_gets_its_own_id() {
        assert_ne!(Parcel::new().id(), Parcel::new().id());
    }

    #[test]
    fn test_generate_tracking_number_shape() {
        for _ in 0..200 {
            let number = Parcel::generate_tracking_number();
            assert_eq!(number.len(), 5);
            assert!(number
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_is_complete_for_new_needs_name_and_address() {
        let mut parcel = Parcel::new();
        assert!(!parcel.is_complete_for(Status::New));
        parcel.recipient_name = "John Snow".to_string();
        assert!(!parcel.is_complete_for(Status::New));
        parcel.delivery_address = "Castle Black".to_string();
        assert!(parcel.is_complete_for(Status::New));
    }

    #[test]
    fn test_is_complete_for_later_status_needs_tracking_and_delivery_date() {
        let mut parcel = Parcel::new();
        parcel.recipient_name = "Tyrion Lannister".to_string();
        parcel.delivery_address = "Casterly Rock".to_string();
        assert!(!parcel.is_complete_for(Status::Dispatched));

        parcel.tracking_number = Some("AGQH6".to_string());
        assert!(!parcel.is_complete_for(Status::Dispatched));

        parcel.delivery_date = Some(Utc::now());
        assert!(parcel.is_complete_for(Status::Dispatched));

        // an assigned-but-empty tracking number does not count
        parcel.tracking_number = Some(String::new());
        assert!(!parcel.is_complete_for(Status::Dispatched));
    }

    #[test]
    fn test_parcel_serializes_with_camel_case_keys() {
        let parcel = Parcel::new();
        let value = serde_json::to_value(&parcel).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "id",
            "recipientName",
            "deliveryAddress",
            "status",
            "trackingNumber",
            "notes",
            "statusChangedDate",
            "deliveryDate",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object["status"], "new");
    }

    #[test]
    fn test_parcel_json_round_trip() {
        let mut parcel = Parcel::new();
        parcel.recipient_name = "Daenerys Targaryen".to_string();
        parcel.delivery_address = "Dragonstone".to_string();
        parcel.tracking_number = Some("F2J24".to_string());
        parcel.notes = "The Mother of Dragons".to_string();
        parcel.delivery_date = Some(Utc::now());

        let json = serde_json::to_string(&parcel).unwrap();
        let decoded: Parcel = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, parcel);
    }

    #[test]
    fn test_display_date_formats() {
        let date = Utc.with_ymd_and_hms(2018, 10, 5, 15, 4, 0).unwrap();
        assert_eq!(Parcel::format_detail_date(date), "Oct 5, 2018 at 3:04 PM");
        assert_eq!(Parcel::format_list_date(date), "10/5/18, 3:04 PM");
    }
}
