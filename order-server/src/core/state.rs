use std::sync::Arc;

use shared::AppError;
use sqlx::SqlitePool;

use crate::auth::{JwtService, hash_password};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::user;
use crate::orders::OrderService;

/// Server state shared across handlers
///
/// Cloning is shallow; the pool and services are reference-counted.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub orders: OrderService,
}

impl ServerState {
    /// Open the database, run migrations, seed the owner account and
    /// wire up services
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let pool = db.pool;

        if let Some(password) = &config.admin_password {
            let hash = hash_password(password)?;
            user::ensure_owner(&pool, &config.admin_email, &hash).await?;
        } else {
            tracing::warn!("ADMIN_PASSWORD not set, skipping owner account seeding");
        }

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let orders = OrderService::new(pool.clone());

        Ok(Self {
            config,
            pool,
            jwt_service,
            orders,
        })
    }
}
