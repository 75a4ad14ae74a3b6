//! Warehouse access layer.
//!
//! This crate provides:
//! - The MySQL connection pool, configured from [`DatabaseConfig`]
//! - The report repository that runs composed statements and assembles reports

pub mod repositories;

pub use repositories::{MovementRepository, ReportQueryError};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use wwi_shared::config::DatabaseConfig;

/// Establishes the warehouse connection pool.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .sqlx_logging(config.sql_logging);

    Database::connect(options).await
}
