//! Review facade.
//!
//! Listings are cached under the `reviews` prefix and always returned
//! newest-first; the backend does not guarantee an order, so the sort
//! happens client-side before the result is cached.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tracing::debug;

use crate::cache::TtlCache;
use crate::error::ApiResult;
use crate::gateway::HttpGateway;
use crate::models::{Review, ReviewCreate, ReviewStats};

#[derive(Debug)]
pub struct ReviewsApi {
    gateway: Arc<HttpGateway>,
    cache: TtlCache,
    list_ttl: Duration,
}

impl ReviewsApi {
    pub(crate) fn new(gateway: Arc<HttpGateway>, cache: TtlCache, list_ttl: Duration) -> Self {
        Self {
            gateway,
            cache,
            list_ttl,
        }
    }

    async fn cached_list(&self, key: &str, path: &str) -> ApiResult<Vec<Review>> {
        if let Some(hit) = self.cache.get_as::<Vec<Review>>(key) {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }
        let mut reviews: Vec<Review> = self.gateway.get(path).await?;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.cache.set_as(key, &reviews, self.list_ttl);
        Ok(reviews)
    }

    fn invalidate(&self) {
        self.cache.clear_prefix("reviews");
    }

    /// Published reviews, newest first.
    pub async fn approved(&self) -> ApiResult<Vec<Review>> {
        self.cached_list("reviews:approved", "/review/").await
    }

    pub async fn stats(&self) -> ApiResult<ReviewStats> {
        let key = "reviews:stats";
        if let Some(hit) = self.cache.get_as::<ReviewStats>(key) {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }
        let stats: ReviewStats = self.gateway.get("/review/stats").await?;
        self.cache.set_as(key, &stats, self.list_ttl);
        Ok(stats)
    }

    /// Submit a review. New reviews start unpublished, pending moderation.
    pub async fn create(&self, payload: &ReviewCreate) -> ApiResult<Review> {
        let created: Review = self
            .gateway
            .send_json(Method::POST, "/review/", payload)
            .await?;
        self.invalidate();
        Ok(created)
    }

    /// Every review, published or not. Admin endpoint.
    pub async fn all(&self) -> ApiResult<Vec<Review>> {
        self.cached_list("reviews:all", "/review/admin/all").await
    }

    /// Reviews awaiting moderation. Admin endpoint.
    pub async fn pending(&self) -> ApiResult<Vec<Review>> {
        self.cached_list("reviews:pending", "/review/admin/pending")
            .await
    }

    /// Flip a review between published and pending. Admin endpoint.
    pub async fn toggle(&self, id: i64) -> ApiResult<Review> {
        let toggled: Review = self
            .gateway
            .send_empty(Method::POST, &format!("/review/admin/{}/toggle", id))
            .await?;
        self.invalidate();
        Ok(toggled)
    }

    /// Delete a review. Admin endpoint.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.gateway
            .delete(&format!("/review/admin/{}", id))
            .await?;
        self.invalidate();
        Ok(())
    }
}
