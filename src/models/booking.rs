//! Booking data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A seat reservation on an excursion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub excursion_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub total_people: i64,
    #[serde(default)]
    pub children: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub excursion_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub total_people: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<i64>,
}
