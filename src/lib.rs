//! Typed client for the Tourbook excursion-booking backend.
//!
//! The crate is organised as a set of resource facades (auth, excursions,
//! reviews, bookings) over a shared HTTP gateway and a TTL response cache:
//!
//! - [`config`] loads settings from the environment.
//! - [`gateway`] executes requests, injects the stored `Authorization`
//!   header and classifies responses; a rejected session tears down the
//!   credentials and cache and raises the [`auth::LogoutSignal`].
//! - [`cache`] holds responses with per-entry TTLs and prefix invalidation.
//! - [`auth`] persists credentials across restarts.
//! - [`api`] is the entry point: [`Api::new`] wires everything together.
//!
//! ```no_run
//! use tourbook::{Api, Config};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Api::new(&Config::from_env()?)?;
//! let user = api.auth.login("admin@example.com", "secret").await?;
//! let excursions = api.excursions.list(&Default::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;

pub use api::{Api, AuthApi, BookingsApi, ExcursionsApi, ReviewsApi};
pub use auth::{CredentialStore, LogoutSignal};
pub use cache::TtlCache;
pub use config::Config;
pub use error::{ApiError, ApiResult, ConfigError, StoreError};
