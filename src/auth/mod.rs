//! Credential persistence and the forced-logout signal.

pub mod store;

pub use store::CredentialStore;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag tripped by the gateway when the backend rejects our
/// credentials.
///
/// The embedding application's routing layer consumes it to force navigation
/// to its login entry point; this crate only raises the flag.
#[derive(Clone, Debug, Default)]
pub struct LogoutSignal {
    triggered: Arc<AtomicBool>,
}

impl LogoutSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Idempotent.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    /// Whether a forced logout is pending.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Consume the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.triggered.swap(false, Ordering::SeqCst)
    }
}
