/**
 * Server Configuration
 *
 * Selects the user store for the loaded configuration.
 *
 * # Error Handling
 *
 * A missing `DATABASE_URL` or a failed connection does not prevent startup:
 * the server falls back to the in-memory store and says so in the log.
 * Migrations run on every start; a failed migration is logged and the
 * server continues.
 */

use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::store::{MemoryUserStore, PgUserStore, SharedUserStore};
use crate::shared::AppConfig;

/// Connect to PostgreSQL and run migrations
pub async fn connect_database(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Ok(pool)
}

/// Build the user store for a configuration
///
/// # Returns
///
/// - a `PgUserStore` when `DATABASE_URL` is set and reachable
/// - a `MemoryUserStore` otherwise
pub async fn load_user_store(config: &AppConfig) -> SharedUserStore {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Users are kept in memory and lost on restart.");
        return Arc::new(MemoryUserStore::new());
    };

    match connect_database(database_url).await {
        Ok(pool) => Arc::new(PgUserStore::new(pool)),
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to the in-memory user store.");
            Arc::new(MemoryUserStore::new())
        }
    }
}
