//! Review data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A customer review. Inactive reviews are pending moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub author_name: String,
    pub email: String,
    pub rating: u8,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Payload for submitting a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub author_name: String,
    pub email: String,
    pub rating: u8,
    pub text: String,
}

/// Aggregate review statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: u64,
    pub average_rating: f64,
    /// Count of reviews per star value, keyed "1" through "5".
    pub rating_distribution: BTreeMap<String, u64>,
    pub pending_count: u64,
    pub approved_count: u64,
}
