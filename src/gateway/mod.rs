//! HTTP gateway: uniform request execution, authentication header injection,
//! response classification and authentication-failure teardown.
//!
//! Every facade call funnels through [`HttpGateway::execute`], which performs
//! exactly one network call per invocation. Retries are deliberately absent:
//! callers are driven by direct user actions where a silent retry would hide
//! failure.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{multipart, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::{CredentialStore, LogoutSignal};
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::ImageUpload;

/// Request payload variants the gateway can carry.
pub enum RequestBody {
    Empty,
    /// JSON-serialized object; sent with `Content-Type: application/json`.
    Json(Value),
    /// Pre-built binary form payload; the transport sets the multipart
    /// boundary itself, so no Content-Type default is applied.
    Multipart(multipart::Form),
}

/// Shared HTTP layer for all resource facades.
///
/// Holds the stored credentials and the owned response cache so an
/// authentication failure can tear both down in one place.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    credentials: CredentialStore,
    cache: TtlCache,
    logout: LogoutSignal,
}

impl HttpGateway {
    pub fn new(
        config: &Config,
        credentials: CredentialStore,
        cache: TtlCache,
        logout: LogoutSignal,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            credentials,
            cache,
            logout,
        })
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub fn logout_signal(&self) -> &LogoutSignal {
        &self.logout
    }

    /// Build a full URL from a resource path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a request and classify the response.
    ///
    /// Header precedence: JSON content-type default, then the injected
    /// `Authorization` header (iff credentials are stored), then
    /// `header_overrides`; the override wins.
    ///
    /// Returns the parsed JSON body; a no-content response yields
    /// `Value::Null`.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        header_overrides: HeaderMap,
    ) -> ApiResult<Value> {
        let url = self.build_url(path);
        debug!(%method, url = %url, "executing request");

        let mut builder = self.client.request(method, &url);

        // The JSON content type is the default for everything except
        // multipart, where the transport sets the boundary itself.
        builder = match body {
            RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        if let Some(auth) = self.credentials.auth_header() {
            let value = HeaderValue::from_str(&auth)
                .map_err(|e| ApiError::InvalidRequest(format!("invalid auth header: {}", e)))?;
            builder = builder.header(AUTHORIZATION, value);
        }

        // Caller-supplied headers replace any default with the same name.
        builder = builder.headers(header_overrides);

        let response = builder.send().await?;
        self.classify(response).await
    }

    async fn classify(&self, response: reqwest::Response) -> ApiResult<Value> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.force_logout();
            return Err(ApiError::Unauthorized);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        if status.is_success() {
            let text = response.text().await?;
            if text.is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(ApiError::Json);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(code, &body);
        warn!(status = code, message = %message, "request failed");

        if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound(message))
        } else {
            Err(ApiError::Request {
                status: code,
                message,
            })
        }
    }

    /// Authentication-failure teardown: credentials gone, cache emptied,
    /// forced-logout signal raised. Runs exactly once per 401 response.
    fn force_logout(&self) {
        info!("authentication rejected, clearing local session");
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "failed to clear stored credentials");
        }
        self.cache.clear();
        self.logout.trigger();
    }

    // ===== Typed helpers =====

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let value = self
            .execute(Method::GET, path, RequestBody::Empty, HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a JSON body and parse a JSON response.
    pub async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let json = serde_json::to_value(body)?;
        let value = self
            .execute(method, path, RequestBody::Json(json), HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a bodyless request and parse a JSON response. A no-content
    /// response deserializes to `()` or any other null-accepting target.
    pub async fn send_empty<T: DeserializeOwned>(&self, method: Method, path: &str) -> ApiResult<T> {
        let value = self
            .execute(method, path, RequestBody::Empty, HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// DELETE a resource, treating no-content as success.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send_empty(Method::DELETE, path).await
    }

    /// POST a single binary file as a multipart form.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        field_name: &str,
        upload: ImageUpload,
    ) -> ApiResult<T> {
        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid content type: {}", e)))?;
        let form = multipart::Form::new().part(field_name.to_string(), part);

        let value = self
            .execute(
                Method::POST,
                path,
                RequestBody::Multipart(form),
                HeaderMap::new(),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Best-effort human-readable message from a structured error body.
///
/// The backend reports failures as `{"detail": ...}` where detail is usually
/// a string but may be a validation structure. Anything unparseable degrades
/// to a generic status-coded message, never to a secondary error.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(detail) => {
                if let Ok(serialized) = serde_json::to_string(detail) {
                    return serialized;
                }
            }
            None => {}
        }
    }
    format!("HTTP error, status {}", status)
}
