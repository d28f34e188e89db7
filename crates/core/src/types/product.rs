//! Catalog products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A catalog product.
///
/// Products are always fetched from the external API and never created or
/// edited locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    pub image_url: Option<String>,
}
