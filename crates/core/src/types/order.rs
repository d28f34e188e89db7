//! Orders, order lines, and total arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{LineId, OrderId, ProductId, UserId};

/// One product quantity entry within an order.
///
/// Line ids are scoped to the containing order, not globally unique. The
/// price is a snapshot taken when the line was created and is not looked up
/// again afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: LineId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
    pub title: String,
    pub image_url: Option<String>,
}

impl OrderLine {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An order: one user's dated sequence of lines plus the derived total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    /// Sum of `price * quantity` over all lines. Recomputed on every line
    /// mutation, never trusted from storage.
    pub total: Decimal,
}

impl Order {
    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Restore the total invariant after a line mutation.
    pub fn recompute_total(&mut self) {
        self.total = self.computed_total();
    }

    /// Next line id: `max(existing) + 1`, starting at 1 for an empty order.
    #[must_use]
    pub fn next_line_id(&self) -> LineId {
        let max = self
            .lines
            .iter()
            .map(|line| line.id.as_i32())
            .max()
            .unwrap_or(0);
        LineId::new(max + 1)
    }
}

/// Input for creating an order. The total is always recomputed from the
/// lines, never taken from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl NewOrder {
    /// Materialize the order under an assigned id.
    #[must_use]
    pub fn into_order(self, id: OrderId) -> Order {
        let mut order = Order {
            id,
            user_id: self.user_id,
            date: self.date,
            lines: self.lines,
            total: Decimal::ZERO,
        };
        order.recompute_total();
        order
    }
}

/// Partial update for an order. When the line sequence changes the total is
/// recomputed as part of the merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPatch {
    pub user_id: Option<UserId>,
    pub date: Option<DateTime<Utc>>,
    pub lines: Option<Vec<OrderLine>>,
}

impl OrderPatch {
    /// Shallow-merge the set fields onto `order`.
    pub fn apply(&self, order: &mut Order) {
        if let Some(user_id) = self.user_id {
            order.user_id = user_id;
        }
        if let Some(date) = self.date {
            order.date = date;
        }
        if let Some(lines) = &self.lines {
            order.lines = lines.clone();
            order.recompute_total();
        }
    }
}

/// Input for adding a line to an order; the line id is assigned by the
/// containing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
    pub title: String,
    pub image_url: Option<String>,
}

impl NewLine {
    /// Materialize the line under an assigned id.
    #[must_use]
    pub fn into_line(self, id: LineId) -> OrderLine {
        OrderLine {
            id,
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
            title: self.title,
            image_url: self.image_url,
        }
    }
}

/// Partial update for one order line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePatch {
    pub product_id: Option<ProductId>,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
    pub title: Option<String>,
    pub image_url: Option<String>,
}

impl LinePatch {
    /// Shallow-merge the set fields onto `line`.
    pub fn apply(&self, line: &mut OrderLine) {
        if let Some(product_id) = self.product_id {
            line.product_id = product_id;
        }
        if let Some(quantity) = self.quantity {
            line.quantity = quantity;
        }
        if let Some(price) = self.price {
            line.price = price;
        }
        if let Some(title) = &self.title {
            line.title = title.clone();
        }
        if let Some(image_url) = &self.image_url {
            line.image_url = Some(image_url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i32, product_id: i32, quantity: u32, price: i64) -> OrderLine {
        OrderLine {
            id: LineId::new(id),
            product_id: ProductId::new(product_id),
            quantity,
            price: Decimal::from(price),
            title: format!("Product {product_id}"),
            image_url: None,
        }
    }

    fn order_with(lines: Vec<OrderLine>) -> Order {
        NewOrder {
            user_id: UserId::new(7),
            date: Utc::now(),
            lines,
        }
        .into_order(OrderId::new(1))
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let order = order_with(vec![line(1, 1, 2, 10), line(2, 2, 1, 5)]);
        assert_eq!(order.total, Decimal::from(25));
        assert_eq!(order.total, order.computed_total());
    }

    #[test]
    fn test_total_after_removing_a_line() {
        let mut order = order_with(vec![line(1, 1, 2, 10), line(2, 2, 1, 5)]);
        order.lines.retain(|l| l.id != LineId::new(2));
        order.recompute_total();
        assert_eq!(order.total, Decimal::from(20));
    }

    #[test]
    fn test_next_line_id_starts_at_one() {
        let order = order_with(Vec::new());
        assert_eq!(order.next_line_id(), LineId::new(1));
    }

    #[test]
    fn test_next_line_id_is_max_plus_one() {
        // Ids seeded from product ids need not be dense.
        let order = order_with(vec![line(3, 30, 1, 4), line(9, 90, 1, 4)]);
        assert_eq!(order.next_line_id(), LineId::new(10));
    }

    #[test]
    fn test_patch_with_lines_recomputes_total() {
        let mut order = order_with(vec![line(1, 1, 2, 10)]);
        let patch = OrderPatch {
            lines: Some(vec![line(1, 1, 3, 10), line(2, 2, 1, 5)]),
            ..OrderPatch::default()
        };
        patch.apply(&mut order);
        assert_eq!(order.total, Decimal::from(35));
    }

    #[test]
    fn test_line_patch_merges_quantity_only() {
        let mut target = line(1, 1, 2, 10);
        LinePatch {
            quantity: Some(5),
            ..LinePatch::default()
        }
        .apply(&mut target);
        assert_eq!(target.quantity, 5);
        assert_eq!(target.price, Decimal::from(10));
    }
}
