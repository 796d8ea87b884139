//! Excursion data structures: listings, nested details, images and the
//! request/query variants the API accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable excursion as returned by the list and single-entity endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excursion {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub price: f64,
    /// Duration in hours
    pub duration: i64,
    /// Total seat capacity
    pub people_amount: i64,
    /// Seats still available
    pub people_left: i64,
    pub bus_number: i64,
    pub is_active: bool,
    #[serde(default)]
    pub image_url: String,
}

/// Payload for creating an excursion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcursionCreate {
    pub title: String,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub price: f64,
    pub duration: i64,
    pub people_amount: i64,
    pub people_left: i64,
    pub bus_number: i64,
    pub is_active: bool,
    pub image_url: String,
}

/// Partial update; absent fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcursionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One stop of the tour programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Extended information attached to an excursion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcursionDetails {
    pub id: i64,
    pub excursion_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inclusions: Option<Vec<String>>,
    #[serde(default)]
    pub itinerary: Option<Vec<ItineraryItem>>,
    #[serde(default)]
    pub meeting_point: Option<String>,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
}

/// Payload for creating or replacing excursion details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcursionDetailsCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Vec<ItineraryItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

/// Details update payload. Same shape as [`ExcursionDetailsCreate`]; the
/// alias keeps update call sites readable.
pub type ExcursionDetailsUpdate = ExcursionDetailsCreate;

/// An image attached to an excursion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcursionImage {
    pub id: i64,
    pub excursion_id: i64,
    pub image_url: String,
}

/// An excursion together with its details and images, as returned by the
/// composed full-view endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcursionFullInfo {
    #[serde(flatten)]
    pub excursion: Excursion,
    #[serde(default)]
    pub details: Option<ExcursionDetails>,
    #[serde(default)]
    pub images: Vec<ExcursionImage>,
}

/// A binary image payload for multipart upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Filters for the main excursion listing. Doubles as the cache-key
/// parameter set, so field order is part of the key format.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExcursionListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ExcursionListQuery {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref category) = self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Filters for the active/not-active listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActiveListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excursion_type: Option<String>,
}

impl ActiveListQuery {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref category) = self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(ref excursion_type) = self.excursion_type {
            pairs.push(("excursion_type", excursion_type.clone()));
        }
        pairs
    }
}
