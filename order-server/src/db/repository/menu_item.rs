//! Menu Item Repository

use super::{RepoError, RepoResult, parse_decimal};
use shared::models::{MenuItem, MenuItemCreate, MenuItemSnapshot, MenuItemUpdate};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

fn map_row(row: &SqliteRow) -> RepoResult<MenuItem> {
    let price: String = row.try_get("price")?;
    Ok(MenuItem {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: parse_decimal(&price, "menu_items.price")?,
    })
}

pub async fn find_all(
    pool: &SqlitePool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<MenuItem>> {
    let rows = match search {
        Some(term) => {
            sqlx::query(
                "SELECT id, name, description, price FROM menu_items \
                 WHERE name LIKE ?1 ORDER BY id LIMIT ?2 OFFSET ?3",
            )
            .bind(format!("%{term}%"))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query("SELECT id, name, description, price FROM menu_items ORDER BY id LIMIT ?1 OFFSET ?2")
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };
    rows.iter().map(map_row).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let row = sqlx::query("SELECT id, name, description, price FROM menu_items WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(map_row).transpose()
}

/// Fetch current catalog snapshots for a set of ids.
///
/// Missing ids are simply absent from the returned map; callers decide
/// whether that is an error.
pub async fn find_snapshots(
    pool: &SqlitePool,
    ids: &[i64],
) -> RepoResult<HashMap<i64, MenuItemSnapshot>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql =
        format!("SELECT id, name, description, price FROM menu_items WHERE id IN ({placeholders})");
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;

    let mut snapshots = HashMap::with_capacity(rows.len());
    for row in &rows {
        let item = map_row(row)?;
        snapshots.insert(item.id, MenuItemSnapshot::from(item));
    }
    Ok(snapshots)
}

pub async fn create(pool: &SqlitePool, data: &MenuItemCreate) -> RepoResult<MenuItem> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO menu_items (name, description, price) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price.to_string())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read menu item after insert".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: &MenuItemUpdate) -> RepoResult<MenuItem> {
    let rows = sqlx::query(
        "UPDATE menu_items SET name = COALESCE(?1, name), \
         description = COALESCE(?2, description), \
         price = COALESCE(?3, price) WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price.map(|p| p.to_string()))
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read menu item after update".into()))
}

/// Delete a menu item. Order lines referencing it keep their snapshot;
/// their `menu_item_id` goes NULL via ON DELETE SET NULL.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
