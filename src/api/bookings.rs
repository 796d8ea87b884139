//! Booking facade.
//!
//! The booking list is cached under the `bookings` prefix. The toggle
//! endpoint is a mutation exposed over GET; that is the backend's contract,
//! so it is kept, and it bypasses the cache and invalidates like any write.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tracing::debug;

use crate::cache::TtlCache;
use crate::error::ApiResult;
use crate::gateway::HttpGateway;
use crate::models::{Booking, BookingCreate};

#[derive(Debug)]
pub struct BookingsApi {
    gateway: Arc<HttpGateway>,
    cache: TtlCache,
    list_ttl: Duration,
}

impl BookingsApi {
    pub(crate) fn new(gateway: Arc<HttpGateway>, cache: TtlCache, list_ttl: Duration) -> Self {
        Self {
            gateway,
            cache,
            list_ttl,
        }
    }

    fn invalidate(&self) {
        self.cache.clear_prefix("bookings");
    }

    /// Reserve seats on an excursion.
    pub async fn create(&self, payload: &BookingCreate) -> ApiResult<Booking> {
        let created: Booking = self
            .gateway
            .send_json(Method::POST, "/booking", payload)
            .await?;
        self.invalidate();
        Ok(created)
    }

    /// All bookings. Admin endpoint.
    pub async fn all(&self) -> ApiResult<Vec<Booking>> {
        let key = "bookings";
        if let Some(hit) = self.cache.get_as::<Vec<Booking>>(key) {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }
        let bookings: Vec<Booking> = self.gateway.get("/bookings").await?;
        self.cache.set_as(key, &bookings, self.list_ttl);
        Ok(bookings)
    }

    /// Flip a booking's confirmation state. Admin endpoint.
    pub async fn toggle(&self, id: i64) -> ApiResult<Booking> {
        let toggled: Booking = self
            .gateway
            .send_empty(Method::GET, &format!("/booking/{}/toggle", id))
            .await?;
        self.invalidate();
        Ok(toggled)
    }
}
