//! Service-level error taxonomy.
//!
//! Facade operations return `Result<_, ServiceError>` so callers can tell
//! "no such entity" apart from "the remote API failed"; the two are not
//! collapsed into one null-like signal. No error here is fatal: the
//! presentation layer turns each into user-facing messaging.

use thiserror::Error;

use crate::fallback::FallbackError;
use crate::store_api::StoreApiError;

/// Errors surfaced by the domain service facades.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote API failed and the fallback store could not satisfy the
    /// operation either.
    #[error("Store API error: {0}")]
    Api(#[from] StoreApiError),

    /// Entity absent both remotely and in the fallback store.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// The fallback store itself failed to persist.
    #[error("Fallback store error: {0}")]
    Fallback(#[from] FallbackError),
}

/// Result type alias for `ServiceError`.
pub type Result<T> = std::result::Result<T, ServiceError>;
