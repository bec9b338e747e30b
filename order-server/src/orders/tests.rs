//! Service-level tests against an in-memory SQLite database

use rust_decimal::Decimal;
use shared::models::{MenuItemCreate, OrderItemsUpdate, OrderStatus, OrderStatusUpdate, UserRole};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::DbService;
use crate::db::repository::{menu_item, user};

use super::error::OrderError;
use super::service::OrderService;

async fn setup() -> (SqlitePool, OrderService, i64) {
    let db = DbService::in_memory().await.unwrap();
    let pool = db.pool.clone();

    let customer = user::create(&pool, "Ada", "Lovelace", "ada@example.com", "hash", UserRole::Customer)
        .await
        .unwrap();

    for (name, price) in [("Margherita", "9.99"), ("Carbonara", "12.50"), ("Tiramisu", "4.00")] {
        menu_item::create(
            &pool,
            &MenuItemCreate {
                name: name.into(),
                description: None,
                price: price.parse().unwrap(),
            },
        )
        .await
        .unwrap();
    }

    let service = OrderService::new(pool.clone());
    (pool, service, customer.id)
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_create_order_snapshots_items_and_totals() {
    let (_pool, service, customer_id) = setup().await;

    // two Margherita + one Carbonara
    let order = service.create(customer_id, &[1, 1, 2]).await.unwrap();

    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total, dec("32.48"));
    let margherita = order
        .items
        .iter()
        .find(|l| l.menu_item_id == Some(1))
        .unwrap();
    assert_eq!(margherita.quantity, 2);
    assert_eq!(margherita.menu_item_name.as_deref(), Some("Margherita"));
    assert!(!order.version.is_nil());
}

#[tokio::test]
async fn test_create_rejects_unknown_menu_items() {
    let (_pool, service, customer_id) = setup().await;

    let err = service.create(customer_id, &[1, 42, 99]).await.unwrap_err();
    match err {
        OrderError::MenuItemsNotFound(ids) => assert_eq!(ids, vec![42, 99]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_update_items_merges_removes_and_recomputes_total() {
    let (_pool, service, customer_id) = setup().await;
    let order = service.create(customer_id, &[1, 1, 2]).await.unwrap();

    // drop one Margherita, add two Tiramisu
    let updated = service
        .update_items(
            order.id,
            Some(customer_id),
            &OrderItemsUpdate {
                add_menu_item_ids: vec![3, 3],
                remove_menu_item_ids: vec![1],
                version: order.version,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.total, dec("30.49"));
    assert_ne!(updated.version, order.version);
    let margherita = updated
        .items
        .iter()
        .find(|l| l.menu_item_id == Some(1))
        .unwrap();
    assert_eq!(margherita.quantity, 1);
    let tiramisu = updated
        .items
        .iter()
        .find(|l| l.menu_item_id == Some(3))
        .unwrap();
    assert_eq!(tiramisu.quantity, 2);

    // total always equals the sum of line subtotals
    let sum: Decimal = updated.items.iter().map(|l| l.subtotal()).sum();
    assert_eq!(updated.total, sum);
}

#[tokio::test]
async fn test_second_writer_from_same_version_conflicts() {
    let (_pool, service, customer_id) = setup().await;
    let order = service.create(customer_id, &[1]).await.unwrap();

    let edit = OrderItemsUpdate {
        add_menu_item_ids: vec![2],
        remove_menu_item_ids: vec![],
        version: order.version,
    };
    service
        .update_items(order.id, Some(customer_id), &edit)
        .await
        .unwrap();

    // replaying the same token must fail, the first write consumed it
    let err = service
        .update_items(order.id, Some(customer_id), &edit)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::VersionConflict));
}

#[tokio::test]
async fn test_failed_update_leaves_order_untouched() {
    let (_pool, service, customer_id) = setup().await;
    let order = service.create(customer_id, &[1]).await.unwrap();

    let err = service
        .update_items(
            order.id,
            Some(customer_id),
            &OrderItemsUpdate {
                add_menu_item_ids: vec![2, 99],
                remove_menu_item_ids: vec![],
                version: order.version,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::MenuItemsNotFound(_)));

    let reloaded = service.get(order.id, None).await.unwrap();
    assert_eq!(reloaded.total, order.total);
    assert_eq!(reloaded.version, order.version);
    assert_eq!(reloaded.items.len(), 1);
}

#[tokio::test]
async fn test_billed_order_rejects_item_edits() {
    let (_pool, service, customer_id) = setup().await;
    let order = service.create(customer_id, &[1]).await.unwrap();
    let processing = service
        .update_status(
            order.id,
            &OrderStatusUpdate {
                status: OrderStatus::Processing,
                version: order.version,
            },
        )
        .await
        .unwrap();
    let billed = service
        .pay(order.id, Some(customer_id), processing.version)
        .await
        .unwrap();
    assert_eq!(billed.status, OrderStatus::Billed);

    let err = service
        .update_items(
            order.id,
            Some(customer_id),
            &OrderItemsUpdate {
                add_menu_item_ids: vec![2],
                remove_menu_item_ids: vec![],
                version: billed.version,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidState(OrderStatus::Billed)));
}

#[tokio::test]
async fn test_pay_requires_processing() {
    let (_pool, service, customer_id) = setup().await;
    let order = service.create(customer_id, &[1]).await.unwrap();

    let err = service
        .pay(order.id, Some(customer_id), order.version)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidState(OrderStatus::Created)));
}

#[tokio::test]
async fn test_cancel_open_order() {
    let (_pool, service, customer_id) = setup().await;
    let order = service.create(customer_id, &[1]).await.unwrap();

    let canceled = service
        .cancel(order.id, Some(customer_id), order.version)
        .await
        .unwrap();
    assert_eq!(canceled.status, OrderStatus::Canceled);

    let err = service
        .cancel(order.id, Some(customer_id), canceled.version)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidState(OrderStatus::Canceled)
    ));
}

#[tokio::test]
async fn test_other_customers_orders_read_as_not_found() {
    let (pool, service, customer_id) = setup().await;
    let other = user::create(&pool, "Grace", "Hopper", "grace@example.com", "hash", UserRole::Customer)
        .await
        .unwrap();
    let order = service.create(customer_id, &[1]).await.unwrap();

    let err = service.get(order.id, Some(other.id)).await.unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));

    // unscoped (owner) access still sees it
    assert!(service.get(order.id, None).await.is_ok());
}

#[tokio::test]
async fn test_delete_requires_current_version() {
    let (_pool, service, customer_id) = setup().await;
    let order = service.create(customer_id, &[1]).await.unwrap();

    let err = service.delete(order.id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, OrderError::VersionConflict));

    service.delete(order.id, order.version).await.unwrap();
    let err = service.get(order.id, None).await.unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
}

#[tokio::test]
async fn test_deleted_menu_item_keeps_line_snapshot() {
    let (pool, service, customer_id) = setup().await;
    let order = service.create(customer_id, &[1, 1]).await.unwrap();

    menu_item::delete(&pool, 1).await.unwrap();

    // ON DELETE SET NULL orphans the line but the snapshot survives
    let reloaded = service.get(order.id, None).await.unwrap();
    assert_eq!(reloaded.items.len(), 1);
    assert_eq!(reloaded.items[0].menu_item_id, None);
    assert_eq!(reloaded.items[0].menu_item_name.as_deref(), Some("Margherita"));
    assert_eq!(reloaded.total, dec("19.98"));
}
