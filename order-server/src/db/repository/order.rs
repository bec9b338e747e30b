//! Order Repository
//!
//! The orders table carries an opaque version token. Every mutating
//! statement here is a compare-and-swap: `WHERE id = ? AND version = ?`,
//! with the caller inspecting the affected-row count. Line writes take a
//! `&mut SqliteConnection` so they join the same transaction as the
//! version swap.

use super::{RepoResult, parse_decimal};
use chrono::{DateTime, Utc};
use shared::models::{Order, OrderLine, OrderStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::RepoError;

fn map_order_row(row: &SqliteRow) -> RepoResult<Order> {
    let total: String = row.try_get("total")?;
    let status: String = row.try_get("status")?;
    let version: String = row.try_get("version")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(Order {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        total: parse_decimal(&total, "orders.total")?,
        status: OrderStatus::parse(&status)
            .ok_or_else(|| RepoError::Database(format!("Invalid order status: {status}")))?,
        created_at: created_at
            .parse::<DateTime<Utc>>()
            .map_err(|e| RepoError::Database(format!("Invalid orders.created_at: {e}")))?,
        version: Uuid::parse_str(&version)
            .map_err(|e| RepoError::Database(format!("Invalid orders.version: {e}")))?,
        items: Vec::new(),
    })
}

fn map_line_row(row: &SqliteRow) -> RepoResult<OrderLine> {
    let price: String = row.try_get("menu_item_price")?;
    Ok(OrderLine {
        id: row.try_get("id")?,
        order_id: row.try_get("order_id")?,
        menu_item_id: row.try_get("menu_item_id")?,
        menu_item_name: row.try_get("menu_item_name")?,
        menu_item_description: row.try_get("menu_item_description")?,
        menu_item_price: parse_decimal(&price, "order_items.menu_item_price")?,
        quantity: row.try_get("quantity")?,
    })
}

// ==================== Reads ====================

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE id = ?1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query(
        "SELECT id, customer_id, total, status, version, created_at FROM orders WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut order = map_order_row(&row)?;
    order.items = find_lines(pool, id).await?;
    Ok(Some(order))
}

pub async fn find_lines(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderLine>> {
    let rows = sqlx::query(
        "SELECT id, order_id, menu_item_id, menu_item_name, menu_item_description, \
         menu_item_price, quantity FROM order_items WHERE order_id = ?1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(map_line_row).collect()
}

/// List orders, newest first, with optional status/customer filters.
/// Lines are not loaded; the list view shows headers only.
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    customer_id: Option<i64>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Order>> {
    let mut sql = String::from(
        "SELECT id, customer_id, total, status, version, created_at FROM orders WHERE 1=1",
    );
    if status.is_some() {
        sql.push_str(" AND status = ?");
    }
    if customer_id.is_some() {
        sql.push_str(" AND customer_id = ?");
    }
    sql.push_str(" ORDER BY id DESC LIMIT ? OFFSET ?");

    let mut query = sqlx::query(&sql);
    if let Some(status) = status {
        query = query.bind(status.as_str());
    }
    if let Some(customer_id) = customer_id {
        query = query.bind(customer_id);
    }
    let rows = query.bind(limit).bind(offset).fetch_all(pool).await?;
    rows.iter().map(map_order_row).collect()
}

// ==================== Writes ====================

pub async fn insert(
    conn: &mut SqliteConnection,
    customer_id: i64,
    total: &str,
    status: OrderStatus,
    version: Uuid,
    created_at: DateTime<Utc>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (customer_id, total, status, version, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(customer_id)
    .bind(total)
    .bind(status.as_str())
    .bind(version.to_string())
    .bind(created_at.to_rfc3339())
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn insert_line(conn: &mut SqliteConnection, line: &OrderLine) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO order_items (order_id, menu_item_id, menu_item_name, \
         menu_item_description, menu_item_price, quantity) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(line.order_id)
    .bind(line.menu_item_id)
    .bind(&line.menu_item_name)
    .bind(&line.menu_item_description)
    .bind(line.menu_item_price.to_string())
    .bind(line.quantity)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn update_line(conn: &mut SqliteConnection, line: &OrderLine) -> RepoResult<()> {
    sqlx::query(
        "UPDATE order_items SET menu_item_name = ?1, menu_item_description = ?2, \
         menu_item_price = ?3, quantity = ?4 WHERE id = ?5",
    )
    .bind(&line.menu_item_name)
    .bind(&line.menu_item_description)
    .bind(line.menu_item_price.to_string())
    .bind(line.quantity)
    .bind(line.id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn delete_lines(conn: &mut SqliteConnection, line_ids: &[i64]) -> RepoResult<()> {
    if line_ids.is_empty() {
        return Ok(());
    }
    let placeholders = vec!["?"; line_ids.len()].join(", ");
    let sql = format!("DELETE FROM order_items WHERE id IN ({placeholders})");
    let mut query = sqlx::query(&sql);
    for id in line_ids {
        query = query.bind(id);
    }
    query.execute(&mut *conn).await?;
    Ok(())
}

/// Compare-and-swap the order header for a line-item edit.
/// Returns false when the expected version no longer matches (or the
/// order is gone); the caller disambiguates.
pub async fn commit_items(
    conn: &mut SqliteConnection,
    id: i64,
    total: &str,
    expected_version: Uuid,
    new_version: Uuid,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE orders SET total = ?1, version = ?2 WHERE id = ?3 AND version = ?4",
    )
    .bind(total)
    .bind(new_version.to_string())
    .bind(id)
    .bind(expected_version.to_string())
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Compare-and-swap the order status
pub async fn commit_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
    expected_version: Uuid,
    new_version: Uuid,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, version = ?2 WHERE id = ?3 AND version = ?4",
    )
    .bind(status.as_str())
    .bind(new_version.to_string())
    .bind(id)
    .bind(expected_version.to_string())
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Version-guarded delete; lines cascade
pub async fn delete_with_version(
    pool: &SqlitePool,
    id: i64,
    expected_version: Uuid,
) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?1 AND version = ?2")
        .bind(id)
        .bind(expected_version.to_string())
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
