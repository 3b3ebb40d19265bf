//! Database layer for Talentboard
//!
//! Provides:
//! - SeaORM entity models
//! - Generic and specialized repositories
//! - Connection pool management

pub mod models;
pub mod repository;

pub use repository::{
    display_handle, normalize_titles, page_range, BaseRepository, BountiesRepository,
    BountyListing, BountyOwner, CategoriesRepository, NewResource, PageRange, PageRequest,
    ResourceQuery, ResourceWithTags, ResourcesRepository, Review, ReviewFilter, ReviewKind,
    ReviewerProfile, ReviewsRepository, SocialLinksRepository, TagsRepository, UsersRepository,
};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper
pub struct DbPool {
    /// Primary connection (for writes)
    pub primary: DatabaseConnection,

    /// Read replica connection (optional)
    pub replica: Option<DatabaseConnection>,
}

/// Clone a `DatabaseConnection` by cloning its underlying handle.
///
/// `#[derive(Clone)]` on `DbPool` cannot be used because sea-orm disables
/// `Clone` on `DatabaseConnection` whenever the `mock` feature is enabled
/// (the test harness pulls it in via dev-dependencies). Every real variant is
/// still cheaply cloneable — pool handles clone by reference, the mock variant
/// is an `Arc` — so this reproduces the derived behavior across feature sets.
fn clone_connection(conn: &DatabaseConnection) -> DatabaseConnection {
    match conn {
        DatabaseConnection::SqlxPostgresPoolConnection(c) => {
            DatabaseConnection::SqlxPostgresPoolConnection(c.clone())
        }
        // The mock variant only exists when sea-orm's `mock` feature is on,
        // which the test harness enables through this crate's `mock` feature.
        #[cfg(feature = "mock")]
        DatabaseConnection::MockDatabaseConnection(c) => {
            DatabaseConnection::MockDatabaseConnection(c.clone())
        }
        DatabaseConnection::Disconnected => DatabaseConnection::Disconnected,
    }
}

impl Clone for DbPool {
    fn clone(&self) -> Self {
        Self {
            primary: clone_connection(&self.primary),
            replica: self.replica.as_ref().map(clone_connection),
        }
    }
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to primary database...");

        let primary = Database::connect(Self::options(&config.url, config))
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect to primary: {}", e),
            })?;

        // Connect to replica if configured
        let replica = if let Some(ref read_url) = config.read_url {
            info!("Connecting to read replica...");

            let replica_conn = Database::connect(Self::options(read_url, config))
                .await
                .map_err(|e| AppError::DatabaseConnection {
                    message: format!("Failed to connect to replica: {}", e),
                })?;

            Some(replica_conn)
        } else {
            None
        };

        info!("Database connections established");

        Ok(Self { primary, replica })
    }

    fn options(url: &str, config: &DatabaseConfig) -> ConnectOptions {
        let mut opts = ConnectOptions::new(url);
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(true);
        opts
    }

    /// Get the connection for reads (replica if available, otherwise primary)
    pub fn read(&self) -> &DatabaseConnection {
        self.replica.as_ref().unwrap_or(&self.primary)
    }

    /// Get the connection for writes (always primary)
    pub fn write(&self) -> &DatabaseConnection {
        &self.primary
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;

        self.primary
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Primary ping failed: {}", e),
            })?;

        if let Some(ref replica) = self.replica {
            replica
                .execute_unprepared("SELECT 1")
                .await
                .map_err(|e| AppError::DatabaseConnection {
                    message: format!("Replica ping failed: {}", e),
                })?;
        }

        Ok(())
    }
}
