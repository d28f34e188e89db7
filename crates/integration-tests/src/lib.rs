//! Integration tests for Storekeep.
//!
//! The tests under `tests/` exercise the service facades against the live
//! demo store API and are `#[ignore]`d by default because they need network
//! access.
//!
//! # Running Tests
//!
//! ```bash
//! # Against the public demo API
//! cargo test -p storekeep-integration-tests -- --ignored
//!
//! # Against a compatible stand-in
//! STOREKEEP_API_BASE_URL=http://localhost:8080 \
//!     cargo test -p storekeep-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use storekeep_admin::config::{DEFAULT_API_BASE_URL, StoreApiConfig};
use storekeep_admin::fallback::FallbackStore;

/// API configuration for the live tests: `STOREKEEP_API_BASE_URL` or the
/// public demo API.
///
/// # Panics
///
/// Panics when the configured base URL does not parse; the tests cannot run
/// without one.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn live_api_config() -> StoreApiConfig {
    let base_url = std::env::var("STOREKEEP_API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    StoreApiConfig {
        base_url: base_url.parse().unwrap(),
    }
}

/// A fallback store rooted in a fresh temp directory, so live tests never
/// touch real dashboard data.
#[must_use]
pub fn scratch_store() -> FallbackStore {
    let dir = std::env::temp_dir().join(format!("storekeep-live-{}", uuid::Uuid::new_v4()));
    FallbackStore::new(dir)
}
