//! Resource facades and the [`Api`] aggregator that wires them together.

pub mod auth;
pub mod bookings;
pub mod excursions;
pub mod reviews;

pub use auth::AuthApi;
pub use bookings::BookingsApi;
pub use excursions::ExcursionsApi;
pub use reviews::ReviewsApi;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{CredentialStore, LogoutSignal};
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::ApiResult;
use crate::gateway::HttpGateway;

/// Append query pairs to a path, percent-encoding values.
pub(crate) fn append_query(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, query)
}

/// Entry point to the Tourbook backend: one gateway, one cache, four
/// resource facades sharing them.
#[derive(Debug)]
pub struct Api {
    gateway: Arc<HttpGateway>,
    pub auth: AuthApi,
    pub excursions: ExcursionsApi,
    pub reviews: ReviewsApi,
    pub bookings: BookingsApi,
}

impl Api {
    /// Construct from configuration. Credentials load from the configured
    /// storage directory, or the platform's per-user data directory when
    /// none is set.
    pub fn new(config: &Config) -> ApiResult<Self> {
        let credentials = match &config.storage_dir {
            Some(dir) => CredentialStore::with_dir(dir.clone()),
            None => CredentialStore::open()?,
        };
        Self::build(config, credentials)
    }

    /// Construct against an explicit base URL and storage directory, with
    /// default timeouts and TTLs. Used by tests and embedders that do not
    /// configure through the environment.
    pub fn with_base_url(base_url: impl Into<String>, storage_dir: PathBuf) -> ApiResult<Self> {
        let config = Config {
            api_base_url: base_url.into(),
            storage_dir: Some(storage_dir),
            ..Config::default()
        };
        Self::new(&config)
    }

    fn build(config: &Config, credentials: CredentialStore) -> ApiResult<Self> {
        let cache = TtlCache::new();
        let signal = LogoutSignal::new();
        let gateway = Arc::new(HttpGateway::new(
            config,
            credentials,
            cache.clone(),
            signal,
        )?);

        let list_ttl = Duration::from_secs(config.list_cache_ttl_secs);
        let entity_ttl = Duration::from_secs(config.entity_cache_ttl_secs);

        Ok(Self {
            auth: AuthApi::new(Arc::clone(&gateway)),
            excursions: ExcursionsApi::new(Arc::clone(&gateway), cache.clone(), list_ttl, entity_ttl),
            reviews: ReviewsApi::new(Arc::clone(&gateway), cache.clone(), list_ttl),
            bookings: BookingsApi::new(Arc::clone(&gateway), cache, list_ttl),
            gateway,
        })
    }

    /// Drop every cached response. Exposed for admin flows that need a
    /// guaranteed-fresh view.
    pub fn clear_cache(&self) {
        self.gateway.cache().clear();
    }

    /// The forced-logout flag the gateway trips on an authentication
    /// failure. Poll or [`LogoutSignal::take`] it from the embedding
    /// application's navigation layer.
    pub fn logout_signal(&self) -> &LogoutSignal {
        self.gateway.logout_signal()
    }
}
