use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Table definitions applied by `--init-schema` and the database tests
pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL for {0} binding")]
    InvalidDatabaseUrl(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Primary and read-replica connection bindings.
///
/// Writes go to `primary`; list and analytics reads go to `replica`.
/// Both pools connect lazily, so an unreachable database only surfaces
/// when a query runs against it.
#[derive(Debug, Clone)]
pub struct Database {
    primary: PgPool,
    replica: PgPool,
}

impl Database {
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = || {
            PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(config.connection_timeout))
        };

        let primary = options()
            .connect_lazy(&config.primary_url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl("primary"))?;
        let replica = options()
            .connect_lazy(&config.replica_url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl("replica"))?;

        info!("Configured primary and replica database bindings");
        Ok(Self { primary, replica })
    }

    pub fn from_pools(primary: PgPool, replica: PgPool) -> Self {
        Self { primary, replica }
    }

    pub fn primary(&self) -> &PgPool {
        &self.primary
    }

    pub fn replica(&self) -> &PgPool {
        &self.replica
    }

    /// Pings both bindings
    pub async fn health_check(&self) -> (Result<(), DatabaseError>, Result<(), DatabaseError>) {
        tokio::join!(ping(&self.primary), ping(&self.replica))
    }

    /// Create the course tables on the primary if they do not exist
    pub async fn init_schema(&self) -> Result<(), DatabaseError> {
        self.primary.execute(SCHEMA_SQL).await?;
        info!("Database schema initialized");
        Ok(())
    }

    pub async fn close(&self) {
        self.primary.close().await;
        self.replica.close().await;
        info!("Closed database pools");
    }
}

async fn ping(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
