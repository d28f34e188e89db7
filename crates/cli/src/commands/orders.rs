//! Order management commands.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use storekeep_admin::conversions::convert_product;
use storekeep_core::{LineId, LinePatch, NewLine, NewOrder, Order, OrderId, ProductId, UserId};

use super::Context;

/// List all orders, or one user's orders.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context, user: Option<i32>) -> Result<(), Box<dyn std::error::Error>> {
    let orders = match user {
        Some(user_id) => ctx.orders.list_for_user(UserId::new(user_id)).await,
        None => ctx.orders.list().await,
    };
    if orders.is_empty() {
        println!("No orders");
        return Ok(());
    }
    for order in &orders {
        print_order_row(order);
    }
    println!("{} order(s)", orders.len());
    Ok(())
}

/// Show one order with its lines.
#[allow(clippy::print_stdout)]
pub async fn get(ctx: &Context, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let order = ctx.orders.get(OrderId::new(id)).await?;
    print_order_row(&order);
    for line in &order.lines {
        println!(
            "  line {:>3}  {:>3} x {:<40} {:>8}  = {}",
            line.id,
            line.quantity,
            line.title,
            line.price,
            line.line_total()
        );
    }
    Ok(())
}

/// Create an empty order; lines are added afterwards.
#[allow(clippy::print_stdout)]
pub async fn create(
    ctx: &Context,
    user: i32,
    date: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let date = match date {
        Some(raw) => day_start(raw)?,
        None => Utc::now(),
    };
    let order = ctx
        .orders
        .create(NewOrder {
            user_id: UserId::new(user),
            date,
            lines: Vec::new(),
        })
        .await?;
    println!("Created order {} for user {}", order.id, order.user_id);
    Ok(())
}

/// Delete an order.
#[allow(clippy::print_stdout)]
pub async fn delete(ctx: &Context, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    ctx.orders.delete(OrderId::new(id)).await?;
    println!("Deleted order {id}");
    Ok(())
}

/// Add a product line, snapshotting price and title from the catalog.
#[allow(clippy::print_stdout)]
pub async fn add_line(
    ctx: &Context,
    order: i32,
    product: i32,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = convert_product(ctx.api.get_product(ProductId::new(product)).await?);
    let line = ctx
        .orders
        .add_line(
            OrderId::new(order),
            NewLine {
                product_id: product.id,
                quantity,
                price: product.price,
                title: product.title,
                image_url: product.image_url,
            },
        )
        .await?;
    println!("Added line {} to order {order}", line.id);
    Ok(())
}

/// Change one line of an order.
#[allow(clippy::print_stdout)]
pub async fn update_line(
    ctx: &Context,
    order: i32,
    line: i32,
    quantity: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let updated = ctx
        .orders
        .update_line(
            OrderId::new(order),
            LineId::new(line),
            LinePatch {
                quantity,
                ..LinePatch::default()
            },
        )
        .await?;
    println!("Line {} is now {} x {}", updated.id, updated.quantity, updated.title);
    Ok(())
}

/// Remove one line from an order.
#[allow(clippy::print_stdout)]
pub async fn remove_line(
    ctx: &Context,
    order: i32,
    line: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.orders
        .remove_line(OrderId::new(order), LineId::new(line))
        .await?;
    println!("Removed line {line} from order {order}");
    Ok(())
}

/// List orders within an inclusive date range.
#[allow(clippy::print_stdout)]
pub async fn range(
    ctx: &Context,
    start: &str,
    end: &str,
    user: Option<i32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let orders = ctx
        .orders
        .range(
            day_start(start)?,
            day_end(end)?,
            user.map(UserId::new),
        )
        .await;
    if orders.is_empty() {
        println!("No orders in range");
        return Ok(());
    }
    for order in &orders {
        print_order_row(order);
    }
    println!("{} order(s)", orders.len());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_order_row(order: &Order) {
    println!(
        "order {:>4}  user {:>4}  {}  {:>2} line(s)  total {}",
        order.id,
        order.user_id,
        order.date.format("%Y-%m-%d"),
        order.lines.len(),
        order.total
    );
}

/// First instant of the given `YYYY-MM-DD` day, in UTC.
fn day_start(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Last second of the given `YYYY-MM-DD` day, in UTC.
fn day_end(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(day_start(raw)? + Duration::days(1) - Duration::seconds(1))
}
