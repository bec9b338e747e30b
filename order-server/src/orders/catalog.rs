//! Menu Catalog Access
//!
//! The reconciler is pure; everything it needs from the catalog is fetched
//! up front through this trait. Tests swap in an in-memory catalog.

use crate::db::repository::{self, RepoResult};
use async_trait::async_trait;
use shared::models::MenuItemSnapshot;
use sqlx::SqlitePool;
use std::collections::HashMap;

use super::error::{OrderError, OrderResult};

/// Read-only lookup into the current menu catalog
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// Snapshot the current state of the given menu items.
    /// Ids with no catalog entry are absent from the map.
    async fn lookup_by_ids(&self, ids: &[i64]) -> RepoResult<HashMap<i64, MenuItemSnapshot>>;
}

/// Catalog backed by the menu_items table
pub struct DbCatalog {
    pool: SqlitePool,
}

impl DbCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuCatalog for DbCatalog {
    async fn lookup_by_ids(&self, ids: &[i64]) -> RepoResult<HashMap<i64, MenuItemSnapshot>> {
        repository::menu_item::find_snapshots(&self.pool, ids).await
    }
}

/// Resolve every requested id or fail with the full list of missing ones.
///
/// Additions are all-or-nothing: one unknown id rejects the whole request,
/// and the error names every missing id so the client can fix the request
/// in one round trip.
pub async fn check_and_get(
    catalog: &dyn MenuCatalog,
    ids: &[i64],
) -> OrderResult<HashMap<i64, MenuItemSnapshot>> {
    let mut unique: Vec<i64> = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let snapshots = catalog.lookup_by_ids(&unique).await?;
    let mut missing: Vec<i64> = unique
        .iter()
        .copied()
        .filter(|id| !snapshots.contains_key(id))
        .collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(OrderError::MenuItemsNotFound(missing));
    }
    Ok(snapshots)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Fixed in-memory catalog for reconciler and service tests
    pub struct StaticCatalog {
        pub items: HashMap<i64, MenuItemSnapshot>,
    }

    #[async_trait]
    impl MenuCatalog for StaticCatalog {
        async fn lookup_by_ids(
            &self,
            ids: &[i64],
        ) -> RepoResult<HashMap<i64, MenuItemSnapshot>> {
            Ok(ids
                .iter()
                .filter_map(|id| self.items.get(id).map(|s| (*id, s.clone())))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StaticCatalog;
    use super::*;
    use rust_decimal::Decimal;

    fn snapshot(id: i64, price: &str) -> MenuItemSnapshot {
        MenuItemSnapshot {
            id,
            name: format!("item-{id}"),
            description: None,
            price: price.parse::<Decimal>().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_check_and_get_reports_all_missing_ids() {
        let catalog = StaticCatalog {
            items: HashMap::from([(1, snapshot(1, "5.00"))]),
        };
        let err = check_and_get(&catalog, &[3, 1, 2, 3]).await.unwrap_err();
        match err {
            OrderError::MenuItemsNotFound(ids) => assert_eq!(ids, vec![2, 3]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_and_get_dedupes_requested_ids() {
        let catalog = StaticCatalog {
            items: HashMap::from([(1, snapshot(1, "5.00")), (2, snapshot(2, "7.50"))]),
        };
        let found = check_and_get(&catalog, &[1, 1, 2]).await.unwrap();
        assert_eq!(found.len(), 2);
    }
}
