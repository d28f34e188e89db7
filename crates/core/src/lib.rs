//! Storekeep Core - shared domain types.
//!
//! This crate provides the domain vocabulary used across all Storekeep
//! components:
//! - `admin` - dashboard services (API client, mapping, fallback store)
//! - `cli` - the `sk-cli` management tool
//!
//! # Architecture
//!
//! The core crate contains only types and invariant helpers - no I/O, no
//! HTTP clients, no filesystem access. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the `User`/`Product`/`Order` entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
