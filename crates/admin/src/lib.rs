//! Storekeep Admin library.
//!
//! Back-office services for the Storekeep dashboard: a client for the demo
//! store REST API, the mapping layer between its wire shapes and the domain
//! vocabulary, a durable local fallback used when the API is unreachable,
//! and the per-entity service facades the presentation layer talks to.
//!
//! The external API is the source of truth whenever it is reachable; the
//! fallback store only answers when it is not. Facade operations never
//! panic - they return tagged results the presentation layer turns into
//! user-facing messaging.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod conversions;
pub mod error;
pub mod fallback;
pub mod services;
pub mod session;
pub mod store_api;
