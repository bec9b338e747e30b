//! Order Service
//!
//! Orchestrates the pure reconciler against storage. Every mutation is a
//! compare-and-swap on the order's version token: the caller presents the
//! token it last observed, the update statement matches on it, and zero
//! affected rows means another writer got there first (or the order is
//! gone; a follow-up existence check disambiguates 409 from 404).

use chrono::Utc;
use shared::models::{Order, OrderItemsUpdate, OrderStatus, OrderStatusUpdate};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::repository::order as order_repo;

use super::catalog::{DbCatalog, MenuCatalog, check_and_get};
use super::error::{OrderError, OrderResult};
use super::lifecycle;
use super::reconciler;

#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    catalog: Arc<dyn MenuCatalog>,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        let catalog = Arc::new(DbCatalog::new(pool.clone()));
        Self { pool, catalog }
    }

    /// Create an order from a multiset of menu item ids.
    /// All ids must exist; the new order starts in CREATED.
    pub async fn create(&self, customer_id: i64, menu_item_ids: &[i64]) -> OrderResult<Order> {
        let counts = reconciler::count_frequency(menu_item_ids);
        let catalog = check_and_get(self.catalog.as_ref(), menu_item_ids).await?;

        let mut lines = Vec::new();
        reconciler::add_items(&mut lines, &counts, &catalog, 0);
        let total = reconciler::order_total(&lines);
        let version = Uuid::new_v4();

        let mut tx = self.pool.begin().await.map_err(repo_err)?;
        let id = order_repo::insert(
            &mut *tx,
            customer_id,
            &total.to_string(),
            OrderStatus::Created,
            version,
            Utc::now(),
        )
        .await?;
        for line in &mut lines {
            line.order_id = id;
            line.id = order_repo::insert_line(&mut *tx, line).await?;
        }
        tx.commit().await.map_err(repo_err)?;

        tracing::info!(order_id = id, customer_id, %total, "Order created");
        self.load(id).await
    }

    /// Apply an incremental add/remove edit to an order's lines.
    ///
    /// `customer_scope` restricts the edit to that customer's own orders;
    /// orders owned by someone else read as not found.
    pub async fn update_items(
        &self,
        id: i64,
        customer_scope: Option<i64>,
        data: &OrderItemsUpdate,
    ) -> OrderResult<Order> {
        let order = self.load_scoped(id, customer_scope).await?;
        lifecycle::ensure_can_modify_items(order.status)?;

        let remove_counts = reconciler::count_frequency(&data.remove_menu_item_ids);
        let add_counts = reconciler::count_frequency(&data.add_menu_item_ids);

        // Removal refresh is best effort: ids deleted from the catalog
        // keep their old snapshot. Additions are strict.
        let remove_ids: Vec<i64> = remove_counts.keys().copied().collect();
        let mut catalog = self.catalog.lookup_by_ids(&remove_ids).await?;
        catalog.extend(check_and_get(self.catalog.as_ref(), &data.add_menu_item_ids).await?);

        let mut lines = order.items.clone();
        let deleted = reconciler::remove_items(&mut lines, &remove_counts, &catalog);
        reconciler::add_items(&mut lines, &add_counts, &catalog, id);
        let total = reconciler::order_total(&lines);
        let new_version = Uuid::new_v4();

        let mut tx = self.pool.begin().await.map_err(repo_err)?;
        let swapped =
            order_repo::commit_items(&mut *tx, id, &total.to_string(), data.version, new_version)
                .await?;
        if !swapped {
            // Roll back before touching the pool again
            drop(tx);
            return Err(self.conflict_or_missing(id).await);
        }
        order_repo::delete_lines(&mut *tx, &deleted).await?;
        for line in &mut lines {
            if line.id == 0 {
                line.id = order_repo::insert_line(&mut *tx, line).await?;
            } else {
                order_repo::update_line(&mut *tx, line).await?;
            }
        }
        tx.commit().await.map_err(repo_err)?;

        tracing::info!(order_id = id, %total, "Order items updated");
        self.load(id).await
    }

    /// Operator status override, version-guarded
    pub async fn update_status(&self, id: i64, data: &OrderStatusUpdate) -> OrderResult<Order> {
        self.swap_status(id, data.status, data.version).await
    }

    /// Customer cancellation; only open orders qualify
    pub async fn cancel(
        &self,
        id: i64,
        customer_scope: Option<i64>,
        version: Uuid,
    ) -> OrderResult<Order> {
        let order = self.load_scoped(id, customer_scope).await?;
        lifecycle::ensure_can_cancel(order.status)?;
        self.swap_status(id, OrderStatus::Canceled, version).await
    }

    /// Customer payment; PROCESSING goes to BILLED
    pub async fn pay(
        &self,
        id: i64,
        customer_scope: Option<i64>,
        version: Uuid,
    ) -> OrderResult<Order> {
        let order = self.load_scoped(id, customer_scope).await?;
        lifecycle::ensure_can_pay(order.status)?;
        self.swap_status(id, OrderStatus::Billed, version).await
    }

    /// Version-guarded delete; order lines cascade
    pub async fn delete(&self, id: i64, version: Uuid) -> OrderResult<()> {
        let deleted = order_repo::delete_with_version(&self.pool, id, version).await?;
        if !deleted {
            return Err(self.conflict_or_missing(id).await);
        }
        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }

    pub async fn get(&self, id: i64, customer_scope: Option<i64>) -> OrderResult<Order> {
        self.load_scoped(id, customer_scope).await
    }

    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        customer_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> OrderResult<Vec<Order>> {
        let orders = order_repo::find_all(&self.pool, status, customer_id, limit, offset).await?;
        Ok(orders)
    }

    async fn swap_status(
        &self,
        id: i64,
        status: OrderStatus,
        expected_version: Uuid,
    ) -> OrderResult<Order> {
        let new_version = Uuid::new_v4();
        let swapped =
            order_repo::commit_status(&self.pool, id, status, expected_version, new_version)
                .await?;
        if !swapped {
            return Err(self.conflict_or_missing(id).await);
        }
        tracing::info!(order_id = id, %status, "Order status changed");
        self.load(id).await
    }

    /// A failed compare-and-swap is a version conflict if the order still
    /// exists, otherwise plain not-found.
    async fn conflict_or_missing(&self, id: i64) -> OrderError {
        match order_repo::exists(&self.pool, id).await {
            Ok(true) => OrderError::VersionConflict,
            Ok(false) => OrderError::NotFound(id),
            Err(e) => e.into(),
        }
    }

    async fn load(&self, id: i64) -> OrderResult<Order> {
        order_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    async fn load_scoped(&self, id: i64, customer_scope: Option<i64>) -> OrderResult<Order> {
        let order = self.load(id).await?;
        // Someone else's order reads as not found rather than forbidden,
        // so order ids are not probeable
        if let Some(customer_id) = customer_scope
            && order.customer_id != customer_id
        {
            return Err(OrderError::NotFound(id));
        }
        Ok(order)
    }
}

fn repo_err(e: sqlx::Error) -> OrderError {
    OrderError::Repo(e.into())
}
