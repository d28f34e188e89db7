//! Order and product conversion functions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use storekeep_core::{LineId, Order, OrderId, OrderLine, Product, ProductId, UserId};

use crate::store_api::StoreApiClient;
use crate::store_api::types::{ApiCart, ApiCartInput, ApiCartLine, ApiProduct};

/// Convert an API product record into the domain shape.
#[must_use]
pub fn convert_product(product: ApiProduct) -> Product {
    Product {
        id: ProductId::new(product.id),
        title: product.title,
        price: product.price,
        image_url: product.image,
    }
}

/// Convert an API cart into an order, resolving each line's product.
///
/// Lookups run one at a time in line order. Lines whose product cannot be
/// resolved are omitted and the total covers the included lines only.
pub async fn convert_cart(api: &StoreApiClient, cart: ApiCart) -> Order {
    let mut lines = Vec::with_capacity(cart.products.len());
    for item in &cart.products {
        match api.get_product(ProductId::new(item.product_id)).await {
            Ok(product) => lines.push(line_from(*item, convert_product(product))),
            Err(err) => warn!(
                cart_id = cart.id,
                product_id = item.product_id,
                error = %err,
                "omitting cart line; product lookup failed"
            ),
        }
    }
    order_from_parts(
        OrderId::new(cart.id),
        UserId::new(cart.user_id),
        cart.date,
        lines,
    )
}

/// Assemble an order from resolved lines, computing the total.
#[must_use]
pub fn order_from_parts(
    id: OrderId,
    user_id: UserId,
    date: DateTime<Utc>,
    lines: Vec<OrderLine>,
) -> Order {
    let mut order = Order {
        id,
        user_id,
        date,
        lines,
        total: Decimal::ZERO,
    };
    order.recompute_total();
    order
}

/// Snapshot one cart line against its resolved product. The line id is
/// seeded from the product id; locally added lines continue with max+1.
fn line_from(item: ApiCartLine, product: Product) -> OrderLine {
    OrderLine {
        id: LineId::new(item.product_id),
        product_id: product.id,
        quantity: item.quantity,
        price: product.price,
        title: product.title,
        image_url: product.image_url,
    }
}

/// Project an order into the outbound cart payload: user, date, and
/// `{product, quantity}` pairs only.
#[must_use]
pub fn cart_input(user_id: UserId, date: DateTime<Utc>, lines: &[OrderLine]) -> ApiCartInput {
    ApiCartInput {
        user_id: user_id.as_i32(),
        date,
        products: lines
            .iter()
            .map(|line| ApiCartLine {
                product_id: line.product_id.as_i32(),
                quantity: line.quantity,
            })
            .collect(),
    }
}
