//! Offline-path tests for the service facades.
//!
//! Every test points the client at an unreachable loopback port, so each
//! remote call fails immediately with a connection error. That exercises
//! the fallback orchestration without any network dependency.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use storekeep_admin::config::StoreApiConfig;
use storekeep_admin::error::ServiceError;
use storekeep_admin::fallback::FallbackStore;
use storekeep_admin::services::{OrderService, UserService};
use storekeep_admin::store_api::StoreApiClient;
use storekeep_core::{
    Address, LineId, NewOrder, NewUser, Order, OrderId, OrderLine, OrderPatch, ProductId, User,
    UserId, UserPatch,
};

/// A base URL nothing listens on; connections are refused immediately.
const UNREACHABLE: &str = "http://127.0.0.1:1";

fn offline_client() -> StoreApiClient {
    let config = StoreApiConfig {
        base_url: UNREACHABLE.parse().unwrap(),
    };
    StoreApiClient::new(&config).unwrap()
}

fn temp_store() -> FallbackStore {
    let dir = std::env::temp_dir().join(format!("storekeep-offline-{}", uuid::Uuid::new_v4()));
    FallbackStore::new(dir)
}

fn user(id: i32, username: &str) -> User {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone: "555-0100".to_string(),
        address: Some(Address {
            city: "Riverton".to_string(),
            street: "4 Quay Rd".to_string(),
        }),
        role: "CLERK".to_string(),
        department: "Operations".to_string(),
        admin: false,
        representative: false,
    }
    .into_user(UserId::new(id))
}

fn line(id: i32, quantity: u32, price: i64) -> OrderLine {
    OrderLine {
        id: LineId::new(id),
        product_id: ProductId::new(id),
        quantity,
        price: Decimal::from(price),
        title: format!("Product {id}"),
        image_url: None,
    }
}

fn date(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

fn order(id: i32, user_id: i32, raw_date: &str, lines: Vec<OrderLine>) -> Order {
    NewOrder {
        user_id: UserId::new(user_id),
        date: date(raw_date),
        lines,
    }
    .into_order(OrderId::new(id))
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_user_list_returns_fallback_contents_unmodified() {
    let store = temp_store();
    let seeded = vec![user(3, "ada"), user(1, "lin")];
    store.write("users", &seeded).await.unwrap();

    let service = UserService::new(offline_client(), store);
    assert_eq!(service.list().await, seeded);
}

#[tokio::test]
async fn test_user_list_is_empty_without_fallback_data() {
    let service = UserService::new(offline_client(), temp_store());
    assert!(service.list().await.is_empty());
}

#[tokio::test]
async fn test_user_get_is_a_transport_error_offline() {
    let service = UserService::new(offline_client(), temp_store());
    let result = service.get(UserId::new(1)).await;
    assert!(matches!(result, Err(ServiceError::Api(_))));
}

#[tokio::test]
async fn test_user_create_synthesizes_max_plus_one() {
    let store = temp_store();
    store
        .write("users", &[user(3, "ada"), user(7, "lin")])
        .await
        .unwrap();

    let service = UserService::new(offline_client(), store);
    let created = service
        .create(NewUser {
            username: "new".to_string(),
            email: "new@example.com".to_string(),
            first_name: "New".to_string(),
            last_name: "Person".to_string(),
            phone: "555-0110".to_string(),
            address: None,
            role: "CLERK".to_string(),
            department: "Operations".to_string(),
            admin: true,
            representative: false,
        })
        .await
        .unwrap();

    assert_eq!(created.id, UserId::new(8));
    assert_eq!(created.user_number, "0000008");
    // The locally created user shows up in a later list.
    let listed = service.list().await;
    assert_eq!(listed.len(), 3);
    let found = listed.iter().find(|u| u.id == created.id).unwrap();
    assert_eq!(found.username, "new");
    // Locally-only fields survive the fallback round trip.
    assert!(found.admin);
    assert_eq!(found.role, "CLERK");
}

#[tokio::test]
async fn test_user_create_starts_at_one_on_empty_collection() {
    let service = UserService::new(offline_client(), temp_store());
    let created = service
        .create(NewUser {
            username: "first".to_string(),
            email: "first@example.com".to_string(),
            first_name: "First".to_string(),
            last_name: "User".to_string(),
            phone: String::new(),
            address: None,
            role: "CLERK".to_string(),
            department: "Operations".to_string(),
            admin: false,
            representative: false,
        })
        .await
        .unwrap();
    assert_eq!(created.id, UserId::new(1));
}

#[tokio::test]
async fn test_user_update_merges_into_fallback_record() {
    let store = temp_store();
    store.write("users", &[user(2, "ada")]).await.unwrap();

    let service = UserService::new(offline_client(), store);
    let updated = service
        .update(
            UserId::new(2),
            UserPatch {
                email: Some("ada@new.example".to_string()),
                admin: Some(true),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.email, "ada@new.example");
    assert!(updated.admin);
    // Untouched fields survive the merge.
    assert_eq!(updated.username, "ada");

    let listed = service.list().await;
    assert_eq!(listed.first().unwrap().email, "ada@new.example");
}

#[tokio::test]
async fn test_user_update_absent_everywhere_is_not_found() {
    let service = UserService::new(offline_client(), temp_store());
    let result = service
        .update(UserId::new(9), UserPatch::default())
        .await;
    assert!(matches!(
        result,
        Err(ServiceError::NotFound { entity: "user", .. })
    ));
}

#[tokio::test]
async fn test_user_delete_removes_fallback_record() {
    let store = temp_store();
    store
        .write("users", &[user(1, "ada"), user(2, "lin")])
        .await
        .unwrap();

    let service = UserService::new(offline_client(), store);
    service.delete(UserId::new(1)).await.unwrap();

    let listed = service.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().unwrap().id, UserId::new(2));
}

#[tokio::test]
async fn test_user_delete_absent_everywhere_is_not_found_not_a_panic() {
    let service = UserService::new(offline_client(), temp_store());
    let result = service.delete(UserId::new(42)).await;
    assert!(matches!(
        result,
        Err(ServiceError::NotFound { entity: "user", .. })
    ));
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_order_list_returns_fallback_contents_unmodified() {
    let store = temp_store();
    let seeded = vec![
        order(5, 1, "2024-04-01T00:00:00Z", vec![line(1, 2, 10)]),
        order(2, 2, "2024-04-02T00:00:00Z", vec![]),
    ];
    store.write("orders", &seeded).await.unwrap();

    let service = OrderService::new(offline_client(), store);
    assert_eq!(service.list().await, seeded);
}

#[tokio::test]
async fn test_order_create_offline_recomputes_total_and_starts_at_one() {
    let service = OrderService::new(offline_client(), temp_store());
    let created = service
        .create(NewOrder {
            user_id: UserId::new(4),
            date: date("2024-05-01T00:00:00Z"),
            lines: vec![line(1, 2, 10), line(2, 1, 5)],
        })
        .await
        .unwrap();

    assert_eq!(created.id, OrderId::new(1));
    assert_eq!(created.total, Decimal::from(25));

    let listed = service.list().await;
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_order_update_merges_lines_and_restores_total_invariant() {
    let store = temp_store();
    // Seed a record whose stored total is stale on purpose.
    let mut seeded = order(3, 1, "2024-04-01T00:00:00Z", vec![line(1, 2, 10)]);
    seeded.total = Decimal::from(999);
    store.write("orders", &[seeded]).await.unwrap();

    let service = OrderService::new(offline_client(), store);
    let updated = service
        .update(
            OrderId::new(3),
            OrderPatch {
                lines: Some(vec![line(1, 2, 10), line(2, 1, 5)]),
                ..OrderPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.total, Decimal::from(25));
    let listed = service.list().await;
    assert_eq!(listed.first().unwrap().total, Decimal::from(25));
}

#[tokio::test]
async fn test_order_delete_absent_everywhere_is_not_found() {
    let service = OrderService::new(offline_client(), temp_store());
    let result = service.delete(OrderId::new(11)).await;
    assert!(matches!(
        result,
        Err(ServiceError::NotFound { entity: "order", .. })
    ));
}

#[tokio::test]
async fn test_line_operations_require_a_reachable_order() {
    // Sub-operations re-fetch the parent order; with the API down and no
    // line-level fallback they fail with a transport error.
    let service = OrderService::new(offline_client(), temp_store());
    let result = service
        .remove_line(OrderId::new(1), LineId::new(1))
        .await;
    assert!(matches!(result, Err(ServiceError::Api(_))));
}

#[tokio::test]
async fn test_range_filters_fallback_by_date_and_user() {
    let store = temp_store();
    store
        .write(
            "orders",
            &[
                order(1, 1, "2024-04-01T12:00:00Z", vec![]),
                order(2, 2, "2024-04-15T12:00:00Z", vec![]),
                order(3, 1, "2024-05-20T12:00:00Z", vec![]),
            ],
        )
        .await
        .unwrap();

    let service = OrderService::new(offline_client(), store);

    let april = service
        .range(
            date("2024-04-01T00:00:00Z"),
            date("2024-04-30T23:59:59Z"),
            None,
        )
        .await;
    assert_eq!(april.len(), 2);

    let april_for_user_one = service
        .range(
            date("2024-04-01T00:00:00Z"),
            date("2024-04-30T23:59:59Z"),
            Some(UserId::new(1)),
        )
        .await;
    assert_eq!(april_for_user_one.len(), 1);
    assert_eq!(april_for_user_one.first().unwrap().id, OrderId::new(1));
}

#[tokio::test]
async fn test_list_for_user_filters_fallback() {
    let store = temp_store();
    store
        .write(
            "orders",
            &[
                order(1, 1, "2024-04-01T00:00:00Z", vec![]),
                order(2, 2, "2024-04-02T00:00:00Z", vec![]),
            ],
        )
        .await
        .unwrap();

    let service = OrderService::new(offline_client(), store);
    let orders = service.list_for_user(UserId::new(2)).await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders.first().unwrap().id, OrderId::new(2));
}
