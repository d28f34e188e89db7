//! Authenticated-session handling.
//!
//! The dashboard's auth model is deliberately simple: a session either
//! exists or it does not. Instead of an ambient flag, the session is an
//! explicit object with a login/logout lifecycle, persisted as one JSON
//! file under the data directory, and it expires a fixed seven days after
//! login.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Session lifetime in days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// File name of the persisted session under the data directory.
const SESSION_FILE: &str = "session.json";

/// Errors from session handling.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Username or password was empty.
    #[error("Invalid credentials: username and password are required")]
    InvalidCredentials,

    /// No live session; the caller must log in first.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The session file could not be read or written.
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The session state could not be serialized.
    #[error("Session serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// An authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Display username captured at login.
    pub username: String,
    /// Instant the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// File-backed session storage with a login/logout lifecycle.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store persisting under `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SESSION_FILE),
        }
    }

    /// Start a session valid for [`SESSION_TTL_DAYS`].
    ///
    /// The demo store API has no authentication endpoint, so the check is
    /// deliberately permissive: any non-empty username and password pair is
    /// accepted.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when either value is empty; storage errors when
    /// the session cannot be persisted.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, SessionError> {
        if username.is_empty() || password.is_empty() {
            return Err(SessionError::InvalidCredentials);
        }
        let session = Session {
            username: username.to_string(),
            expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&session)?)?;
        debug!(username, "session started");
        Ok(session)
    }

    /// End the current session, clearing the persisted state. Logging out
    /// without a session is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file exists but cannot be removed.
    pub fn logout(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("session cleared");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// The live session, if any. Expired or corrupt sessions are cleared on
    /// read.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        let bytes = std::fs::read(&self.path).ok()?;
        let Ok(session) = serde_json::from_slice::<Session>(&bytes) else {
            let _ = std::fs::remove_file(&self.path);
            return None;
        };
        if session.is_expired() {
            let _ = std::fs::remove_file(&self.path);
            return None;
        }
        Some(session)
    }

    /// Whether a live session exists.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Session guard: the live session, or `NotLoggedIn`.
    ///
    /// # Errors
    ///
    /// `NotLoggedIn` when no live session exists.
    pub fn require_login(&self) -> Result<Session, SessionError> {
        self.current().ok_or(SessionError::NotLoggedIn)
    }
}
