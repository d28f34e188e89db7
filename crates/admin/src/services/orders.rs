//! Order service facade.
//!
//! Order lines have no line-level external endpoint. Every line mutation
//! re-fetches the order, rewrites the line sequence in memory, recomputes
//! the total, and writes the whole order back through `update`.

use chrono::{DateTime, Utc};
use tracing::warn;

use storekeep_core::{
    LineId, LinePatch, NewLine, NewOrder, Order, OrderId, OrderLine, OrderPatch, UserId,
};

use crate::conversions::{cart_input, convert_cart};
use crate::error::{Result, ServiceError};
use crate::fallback::FallbackStore;
use crate::store_api::StoreApiClient;

use super::next_id;

/// Fallback collection holding order records in domain shape.
const ORDERS: &str = "orders";

/// Service facade for order management.
#[derive(Debug, Clone)]
pub struct OrderService {
    api: StoreApiClient,
    store: FallbackStore,
}

impl OrderService {
    /// Create a facade over the given client and fallback store.
    #[must_use]
    pub const fn new(api: StoreApiClient, store: FallbackStore) -> Self {
        Self { api, store }
    }

    /// List all orders.
    ///
    /// External fetch and map; on any failure the fallback collection is
    /// returned as-is, in persisted order. Never fails.
    pub async fn list(&self) -> Vec<Order> {
        match self.api.list_carts().await {
            Ok(carts) => {
                let mut orders = Vec::with_capacity(carts.len());
                for cart in carts {
                    orders.push(convert_cart(&self.api, cart).await);
                }
                orders
            }
            Err(err) => {
                warn!(error = %err, "order list failed; serving fallback data");
                self.store.read(ORDERS).await
            }
        }
    }

    /// List one user's orders. On remote failure the fallback collection is
    /// filtered by user instead.
    pub async fn list_for_user(&self, user_id: UserId) -> Vec<Order> {
        match self.api.carts_for_user(user_id).await {
            Ok(carts) => {
                let mut orders = Vec::with_capacity(carts.len());
                for cart in carts {
                    orders.push(convert_cart(&self.api, cart).await);
                }
                orders
            }
            Err(err) => {
                warn!(error = %err, user_id = user_id.as_i32(), "user order list failed; serving fallback data");
                self.store
                    .read::<Order>(ORDERS)
                    .await
                    .into_iter()
                    .filter(|order| order.user_id == user_id)
                    .collect()
            }
        }
    }

    /// Fetch one order by id, resolving its lines' products.
    ///
    /// # Errors
    ///
    /// `NotFound` when the API reports the id absent; `Api` when the fetch
    /// fails outright.
    pub async fn get(&self, id: OrderId) -> Result<Order> {
        match self.api.get_cart(id).await {
            Ok(cart) => Ok(convert_cart(&self.api, cart).await),
            Err(err) if err.is_not_found() => Err(ServiceError::NotFound {
                entity: "order",
                id: id.as_i32(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Create an order. The total is recomputed from the given lines, never
    /// taken from the caller.
    ///
    /// Remote path: the API assigns the id and the mapped response is
    /// mirrored into the fallback collection. Fallback path: the id is
    /// synthesized locally (`max(visible)+1`) and the whole visible set
    /// plus the new record persisted.
    ///
    /// # Errors
    ///
    /// Returns an error only when the fallback store itself cannot persist.
    pub async fn create(&self, new: NewOrder) -> Result<Order> {
        let input = cart_input(new.user_id, new.date, &new.lines);
        match self.api.create_cart(&input).await {
            Ok(cart) => {
                let order = convert_cart(&self.api, cart).await;
                self.store.append(ORDERS, order.clone()).await?;
                Ok(order)
            }
            Err(err) => {
                warn!(error = %err, "order create failed; persisting locally");
                let mut records = self.list().await;
                let id = next_id(records.iter().map(|o| o.id.as_i32()));
                let order = new.into_order(OrderId::new(id));
                records.push(order.clone());
                self.store.write(ORDERS, &records).await?;
                Ok(order)
            }
        }
    }

    /// Update an order.
    ///
    /// Remote path: merge the patch onto the freshly fetched order and PUT
    /// the whole thing back. On any remote failure the patch is merged onto
    /// the fallback record instead.
    ///
    /// # Errors
    ///
    /// `NotFound` when the record exists neither remotely nor in the
    /// fallback store.
    pub async fn update(&self, id: OrderId, patch: OrderPatch) -> Result<Order> {
        match self.get(id).await {
            Ok(mut order) => {
                patch.apply(&mut order);
                let input = cart_input(order.user_id, order.date, &order.lines);
                match self.api.update_cart(id, &input).await {
                    Ok(cart) => Ok(convert_cart(&self.api, cart).await),
                    Err(err) => {
                        warn!(error = %err, "order update failed; merging into fallback data");
                        self.update_fallback(id, &patch).await
                    }
                }
            }
            Err(_) => self.update_fallback(id, &patch).await,
        }
    }

    /// Delete an order.
    ///
    /// On remote failure a fallback removal is attempted instead.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing was removed anywhere.
    pub async fn delete(&self, id: OrderId) -> Result<()> {
        match self.api.delete_cart(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "order delete failed; removing from fallback data");
                let removed = self
                    .store
                    .remove_where(ORDERS, |o: &Order| o.id == id)
                    .await?;
                if removed {
                    Ok(())
                } else {
                    Err(ServiceError::NotFound {
                        entity: "order",
                        id: id.as_i32(),
                    })
                }
            }
        }
    }

    // =========================================================================
    // Line sub-operations
    // =========================================================================

    /// Add a line to an order. The line id is assigned `max(existing)+1`
    /// and the total recomputed before the order is written back.
    ///
    /// # Errors
    ///
    /// Propagates the `get`/`update` errors of the parent order.
    pub async fn add_line(&self, order_id: OrderId, line: NewLine) -> Result<OrderLine> {
        let mut order = self.get(order_id).await?;
        let line = line.into_line(order.next_line_id());
        order.lines.push(line.clone());
        order.recompute_total();
        self.update(
            order_id,
            OrderPatch {
                lines: Some(order.lines),
                ..OrderPatch::default()
            },
        )
        .await?;
        Ok(line)
    }

    /// Update one line of an order, recomputing the total.
    ///
    /// # Errors
    ///
    /// `NotFound` when the order has no such line; otherwise propagates the
    /// `get`/`update` errors of the parent order.
    pub async fn update_line(
        &self,
        order_id: OrderId,
        line_id: LineId,
        patch: LinePatch,
    ) -> Result<OrderLine> {
        let mut order = self.get(order_id).await?;
        let Some(line) = order.lines.iter_mut().find(|l| l.id == line_id) else {
            return Err(ServiceError::NotFound {
                entity: "order line",
                id: line_id.as_i32(),
            });
        };
        patch.apply(line);
        let updated = line.clone();
        order.recompute_total();
        self.update(
            order_id,
            OrderPatch {
                lines: Some(order.lines),
                ..OrderPatch::default()
            },
        )
        .await?;
        Ok(updated)
    }

    /// Remove one line from an order, recomputing the total.
    ///
    /// # Errors
    ///
    /// `NotFound` when the order has no such line; otherwise propagates the
    /// `get`/`update` errors of the parent order.
    pub async fn remove_line(&self, order_id: OrderId, line_id: LineId) -> Result<()> {
        let mut order = self.get(order_id).await?;
        let before = order.lines.len();
        order.lines.retain(|l| l.id != line_id);
        if order.lines.len() == before {
            return Err(ServiceError::NotFound {
                entity: "order line",
                id: line_id.as_i32(),
            });
        }
        order.recompute_total();
        self.update(
            order_id,
            OrderPatch {
                lines: Some(order.lines),
                ..OrderPatch::default()
            },
        )
        .await?;
        Ok(())
    }

    /// Orders whose date falls within `[start, end]` inclusive, optionally
    /// restricted to one user.
    ///
    /// The API has no server-side date filter, so filtering happens
    /// client-side - before product resolution, to avoid wasted lookups. On
    /// remote failure the fallback collection is filtered the same way.
    pub async fn range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        user_id: Option<UserId>,
    ) -> Vec<Order> {
        let carts = match user_id {
            Some(user_id) => self.api.carts_for_user(user_id).await,
            None => self.api.list_carts().await,
        };
        match carts {
            Ok(carts) => {
                let mut orders = Vec::new();
                for cart in carts
                    .into_iter()
                    .filter(|cart| cart.date >= start && cart.date <= end)
                {
                    orders.push(convert_cart(&self.api, cart).await);
                }
                orders
            }
            Err(err) => {
                warn!(error = %err, "order range query failed; filtering fallback data");
                self.store
                    .read::<Order>(ORDERS)
                    .await
                    .into_iter()
                    .filter(|order| order.date >= start && order.date <= end)
                    .filter(|order| user_id.is_none_or(|id| order.user_id == id))
                    .collect()
            }
        }
    }

    /// Merge a patch onto the fallback record for `id`.
    async fn update_fallback(&self, id: OrderId, patch: &OrderPatch) -> Result<Order> {
        let orders: Vec<Order> = self.store.read(ORDERS).await;
        let Some(mut order) = orders.into_iter().find(|o| o.id == id) else {
            return Err(ServiceError::NotFound {
                entity: "order",
                id: id.as_i32(),
            });
        };
        patch.apply(&mut order);
        self.store
            .replace_where(ORDERS, |o: &Order| o.id == id, order.clone())
            .await?;
        Ok(order)
    }
}
