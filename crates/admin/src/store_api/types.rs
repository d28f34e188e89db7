//! Wire types for the demo store API.
//!
//! These mirror the JSON shapes the API actually returns. Deserialization
//! is tolerant of missing sub-objects because create and update responses
//! echo only the fields that were sent.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user record as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: i32,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: Option<ApiName>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<ApiAddress>,
}

/// Compound name sub-object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiName {
    pub firstname: String,
    pub lastname: String,
}

/// Full address sub-object. The dashboard only tracks city and street; the
/// remaining fields exist to satisfy the wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAddress {
    pub city: String,
    pub street: String,
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub zipcode: String,
}

/// Outbound user payload. Unset fields are omitted from the serialized body
/// so partial updates stay partial.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ApiName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<ApiAddress>,
}

/// A catalog product as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
}

/// A cart (order) as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCart {
    pub id: i32,
    pub user_id: i32,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub products: Vec<ApiCartLine>,
}

/// One cart line: a product reference and a quantity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCartLine {
    pub product_id: i32,
    pub quantity: u32,
}

/// Outbound cart payload. Only the user, date, and line projection are ever
/// written back; prices and titles are derived, not authoritative.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCartInput {
    pub user_id: i32,
    pub date: DateTime<Utc>,
    pub products: Vec<ApiCartLine>,
}
