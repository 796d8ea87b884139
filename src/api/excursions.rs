//! Excursion facade: cached reads, invalidating writes and the composite
//! create/update flows.
//!
//! Read path: compute key, check cache, fetch and populate on miss. Write
//! path: network first, invalidate only after the backend confirms success,
//! so a failed write leaves cached data untouched.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{cache_key, TtlCache};
use crate::error::{ApiError, ApiResult};
use crate::gateway::HttpGateway;
use crate::models::{
    ActiveListQuery, Excursion, ExcursionCreate, ExcursionDetails, ExcursionDetailsCreate,
    ExcursionDetailsUpdate, ExcursionFullInfo, ExcursionImage, ExcursionListQuery,
    ExcursionUpdate, ImageUpload, ItineraryItem,
};

use super::append_query;

/// Multipart field name the backend expects for image uploads
const IMAGE_FIELD: &str = "image_file";

/// Cache prefixes holding per-excursion entries, keyed `{prefix}:{id}`
const ENTITY_PREFIXES: [&str; 6] = [
    "excursion",
    "excursion_details",
    "excursion_images",
    "excursion_inclusions",
    "excursion_itinerary",
    "excursion_requirements",
];

#[derive(Debug)]
pub struct ExcursionsApi {
    gateway: Arc<HttpGateway>,
    cache: TtlCache,
    list_ttl: Duration,
    entity_ttl: Duration,
}

impl ExcursionsApi {
    pub(crate) fn new(
        gateway: Arc<HttpGateway>,
        cache: TtlCache,
        list_ttl: Duration,
        entity_ttl: Duration,
    ) -> Self {
        Self {
            gateway,
            cache,
            list_ttl,
            entity_ttl,
        }
    }

    async fn cached_get<T>(&self, key: String, path: &str, ttl: Duration) -> ApiResult<T>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(hit) = self.cache.get_as::<T>(&key) {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }
        let value: T = self.gateway.get(path).await?;
        self.cache.set_as(key, &value, ttl);
        Ok(value)
    }

    /// Drop every cached listing and composed full view.
    ///
    /// The `excursions` prefix also covers the active, not-active, category
    /// and search listings; per-excursion entity keys use the singular
    /// `excursion:` family and survive this.
    fn invalidate_lists(&self) {
        self.cache.clear_prefix("excursions");
        self.cache.clear_prefix("excursion_full");
    }

    /// Drop listings plus every cached entry for one excursion. Entries for
    /// other ids are untouched.
    fn invalidate(&self, id: i64) {
        for prefix in ENTITY_PREFIXES {
            self.cache.remove(&format!("{}:{}", prefix, id));
        }
        self.invalidate_lists();
    }

    // ===== Reads =====

    pub async fn list(&self, query: &ExcursionListQuery) -> ApiResult<Vec<Excursion>> {
        let key = cache_key("excursions", Some(query));
        let path = append_query("/excursions", &query.query_pairs());
        self.cached_get(key, &path, self.list_ttl).await
    }

    pub async fn list_active(&self, query: &ActiveListQuery) -> ApiResult<Vec<Excursion>> {
        let key = cache_key("excursions_active", Some(query));
        let path = append_query("/excursions/active", &query.query_pairs());
        self.cached_get(key, &path, self.list_ttl).await
    }

    pub async fn list_inactive(&self, query: &ActiveListQuery) -> ApiResult<Vec<Excursion>> {
        let key = cache_key("excursions_not_active", Some(query));
        let path = append_query("/excursions/not_active", &query.query_pairs());
        self.cached_get(key, &path, self.list_ttl).await
    }

    pub async fn by_category(&self, category: &str) -> ApiResult<Vec<Excursion>> {
        let key = cache_key("excursions_category", Some(&category));
        let path = format!("/excursions/category/{}", urlencoding::encode(category));
        self.cached_get(key, &path, self.list_ttl).await
    }

    pub async fn search(&self, query: &str) -> ApiResult<Vec<Excursion>> {
        let key = cache_key("excursions_search", Some(&query));
        let path = format!("/excursions/search/?q={}", urlencoding::encode(query));
        self.cached_get(key, &path, self.list_ttl).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Excursion> {
        let key = format!("excursion:{}", id);
        let path = format!("/excursions/{}", id);
        self.cached_get(key, &path, self.entity_ttl).await
    }

    /// The composed view: excursion plus details plus images.
    ///
    /// When the backend's composed payload carries no images, the image list
    /// is fetched separately and embedded. That fetch is best-effort; its
    /// failure leaves the view imageless rather than failing the call.
    pub async fn full(&self, id: i64) -> ApiResult<ExcursionFullInfo> {
        let key = format!("excursion_full:{}", id);
        if let Some(hit) = self.cache.get_as::<ExcursionFullInfo>(&key) {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }

        let mut full: ExcursionFullInfo =
            self.gateway.get(&format!("/excursions/{}/full", id)).await?;

        if full.images.is_empty() {
            match self.fetch_images(id).await {
                Ok(images) => full.images = images,
                Err(e) => warn!(id, error = %e, "could not backfill images for full view"),
            }
        }

        self.cache.set_as(key, &full, self.entity_ttl);
        Ok(full)
    }

    pub async fn details(&self, id: i64) -> ApiResult<ExcursionDetails> {
        let key = format!("excursion_details:{}", id);
        let path = format!("/excursions/{}/details", id);
        self.cached_get(key, &path, self.entity_ttl).await
    }

    /// Images attached to an excursion. An excursion without an image record
    /// reads as an empty list, not an error.
    pub async fn images(&self, id: i64) -> ApiResult<Vec<ExcursionImage>> {
        let key = format!("excursion_images:{}", id);
        if let Some(hit) = self.cache.get_as::<Vec<ExcursionImage>>(&key) {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }
        let images = self.fetch_images(id).await?;
        self.cache.set_as(key, &images, self.entity_ttl);
        Ok(images)
    }

    async fn fetch_images(&self, id: i64) -> ApiResult<Vec<ExcursionImage>> {
        match self
            .gateway
            .get(&format!("/excursions/{}/get_images", id))
            .await
        {
            Ok(images) => Ok(images),
            Err(ApiError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub async fn inclusions(&self, id: i64) -> ApiResult<Vec<String>> {
        let key = format!("excursion_inclusions:{}", id);
        let path = format!("/excursions/{}/inclusions", id);
        self.cached_get(key, &path, self.entity_ttl).await
    }

    pub async fn itinerary(&self, id: i64) -> ApiResult<Vec<ItineraryItem>> {
        let key = format!("excursion_itinerary:{}", id);
        let path = format!("/excursions/{}/itinerary", id);
        self.cached_get(key, &path, self.entity_ttl).await
    }

    pub async fn requirements(&self, id: i64) -> ApiResult<Vec<String>> {
        let key = format!("excursion_requirements:{}", id);
        let path = format!("/excursions/{}/requirements", id);
        self.cached_get(key, &path, self.entity_ttl).await
    }

    // ===== Writes =====

    pub async fn create(&self, payload: &ExcursionCreate) -> ApiResult<Excursion> {
        let created: Excursion = self
            .gateway
            .send_json(Method::POST, "/excursions", payload)
            .await?;
        self.invalidate_lists();
        Ok(created)
    }

    pub async fn update(&self, id: i64, payload: &ExcursionUpdate) -> ApiResult<Excursion> {
        let updated: Excursion = self
            .gateway
            .send_json(Method::PUT, &format!("/excursions/{}", id), payload)
            .await?;
        self.invalidate(id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.gateway.delete(&format!("/excursions/{}", id)).await?;
        self.invalidate(id);
        Ok(())
    }

    pub async fn toggle_active(&self, id: i64) -> ApiResult<Excursion> {
        let toggled: Excursion = self
            .gateway
            .send_empty(Method::PATCH, &format!("/excursions/{}/toggle-active", id))
            .await?;
        self.invalidate(id);
        Ok(toggled)
    }

    /// Adjust remaining capacity; `count` may be negative to release seats.
    pub async fn add_people(&self, id: i64, count: i64) -> ApiResult<Excursion> {
        let path = format!("/excursions/{}/add_people?people_count={}", id, count);
        let updated: Excursion = self.gateway.send_empty(Method::PATCH, &path).await?;
        self.invalidate(id);
        Ok(updated)
    }

    pub async fn change_bus_number(&self, id: i64, bus_number: i64) -> ApiResult<Excursion> {
        let path = format!("/excursions/{}/bus-number?bus_number={}", id, bus_number);
        let updated: Excursion = self.gateway.send_empty(Method::PUT, &path).await?;
        self.invalidate(id);
        Ok(updated)
    }

    // ===== Details =====

    pub async fn create_details(
        &self,
        id: i64,
        payload: &ExcursionDetailsCreate,
    ) -> ApiResult<ExcursionDetails> {
        let created: ExcursionDetails = self
            .gateway
            .send_json(Method::POST, &format!("/excursions/{}/details", id), payload)
            .await?;
        self.invalidate(id);
        Ok(created)
    }

    pub async fn update_details(
        &self,
        id: i64,
        payload: &ExcursionDetailsUpdate,
    ) -> ApiResult<ExcursionDetails> {
        let updated: ExcursionDetails = self
            .gateway
            .send_json(Method::PUT, &format!("/excursions/{}/details", id), payload)
            .await?;
        self.invalidate(id);
        Ok(updated)
    }

    /// Partial details update; the backend creates the record when missing.
    pub async fn upsert_details(
        &self,
        id: i64,
        payload: &ExcursionDetailsUpdate,
    ) -> ApiResult<ExcursionDetails> {
        let upserted: ExcursionDetails = self
            .gateway
            .send_json(Method::PATCH, &format!("/excursions/{}/details", id), payload)
            .await?;
        self.invalidate(id);
        Ok(upserted)
    }

    pub async fn delete_details(&self, id: i64) -> ApiResult<()> {
        self.gateway
            .delete(&format!("/excursions/{}/details", id))
            .await?;
        self.invalidate(id);
        Ok(())
    }

    // ===== Images =====

    pub async fn add_image(&self, id: i64, upload: ImageUpload) -> ApiResult<ExcursionImage> {
        let image = self.upload_image(id, upload).await?;
        self.invalidate(id);
        Ok(image)
    }

    async fn upload_image(&self, id: i64, upload: ImageUpload) -> ApiResult<ExcursionImage> {
        self.gateway
            .post_multipart(&format!("/excursions/{}/add_image", id), IMAGE_FIELD, upload)
            .await
    }

    /// Delete an image by its own id. The owning excursion is not known
    /// here, so every image, full-view and listing entry is dropped.
    pub async fn delete_image(&self, image_id: i64) -> ApiResult<bool> {
        let value: Value = self
            .gateway
            .send_empty(Method::DELETE, &format!("/excursions/image/{}", image_id))
            .await?;

        self.cache.clear_prefix("excursion_images");
        self.invalidate_lists();

        // The backend is inconsistent here: a JSON `true`, a quoted "true"
        // string and an empty 204 all mean the image is gone.
        let deleted = match &value {
            Value::Bool(true) | Value::Null => true,
            Value::String(s) => s == "true",
            _ => false,
        };
        Ok(deleted)
    }

    /// Upload several images concurrently. Every upload runs to completion
    /// regardless of sibling failures; the first error is surfaced after all
    /// have settled, with the successful uploads already committed.
    pub async fn bulk_add_images(
        &self,
        id: i64,
        uploads: Vec<ImageUpload>,
    ) -> ApiResult<Vec<ExcursionImage>> {
        let pending = uploads
            .into_iter()
            .map(|upload| self.upload_image(id, upload));
        let results = join_all(pending).await;

        let mut images = Vec::new();
        let mut first_error = None;
        for result in results {
            match result {
                Ok(image) => images.push(image),
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(e) => warn!(id, error = %e, "additional image upload failed"),
            }
        }

        if !images.is_empty() {
            self.invalidate(id);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(images),
        }
    }

    // ===== Composites =====

    /// Create an excursion, then its details, then its images, then read
    /// back the composed view.
    ///
    /// Steps run in order and are not atomic: a failure leaves the earlier
    /// steps committed on the backend and surfaces the failing step's error.
    pub async fn create_with_details_and_images(
        &self,
        payload: &ExcursionCreate,
        details: Option<&ExcursionDetailsCreate>,
        images: Vec<ImageUpload>,
    ) -> ApiResult<ExcursionFullInfo> {
        let excursion = self.create(payload).await?;

        if let Some(details) = details {
            self.create_details(excursion.id, details).await?;
        }
        if !images.is_empty() {
            self.bulk_add_images(excursion.id, images).await?;
        }

        self.full(excursion.id).await
    }

    /// Update an excursion, its details and its image set in one call, then
    /// read back the composed view.
    ///
    /// A details update against an excursion that has no details record yet
    /// falls back to creating one. Image deletions run concurrently and are
    /// tolerated individually; a failed delete is logged, not fatal.
    pub async fn update_comprehensive(
        &self,
        id: i64,
        payload: &ExcursionUpdate,
        details: Option<&ExcursionDetailsUpdate>,
        new_images: Vec<ImageUpload>,
        deleted_image_ids: Vec<i64>,
    ) -> ApiResult<ExcursionFullInfo> {
        self.update(id, payload).await?;

        if let Some(details) = details {
            match self.update_details(id, details).await {
                Ok(_) => {}
                Err(ApiError::NotFound(_)) => {
                    debug!(id, "no details record yet, creating one");
                    self.create_details(id, details).await?;
                }
                Err(e) => return Err(e),
            }
        }

        if !new_images.is_empty() {
            self.bulk_add_images(id, new_images).await?;
        }

        if !deleted_image_ids.is_empty() {
            let deletes = deleted_image_ids
                .iter()
                .map(|&image_id| self.delete_image(image_id));
            for result in join_all(deletes).await {
                if let Err(e) = result {
                    warn!(id, error = %e, "image delete failed during comprehensive update");
                }
            }
        }

        self.full(id).await
    }
}
