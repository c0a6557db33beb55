// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the per-entity storage layers

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tracing::{debug, info};

use peduli_storage::StorageError;

use crate::documents::DocumentStorage;
use crate::programs::ProgramStorage;
use crate::proposals::ProposalStorage;
use crate::reports::ReportStorage;
use crate::users::UserStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub user_storage: Arc<UserStorage>,
    pub proposal_storage: Arc<ProposalStorage>,
    pub program_storage: Arc<ProgramStorage>,
    pub report_storage: Arc<ReportStorage>,
    pub document_storage: Arc<DocumentStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let user_storage = Arc::new(UserStorage::new(pool.clone()));
        let proposal_storage = Arc::new(ProposalStorage::new(pool.clone()));
        let program_storage = Arc::new(ProgramStorage::new(pool.clone()));
        let report_storage = Arc::new(ReportStorage::new(pool.clone()));
        let document_storage = Arc::new(DocumentStorage::new(pool.clone()));

        Self {
            pool,
            user_storage,
            proposal_storage,
            program_storage,
            report_storage,
            document_storage,
        }
    }

    /// Initialize database state with default configuration
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_path(None).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(
        database_path: Option<std::path::PathBuf>,
    ) -> Result<Self, StorageError> {
        let database_path = database_path.unwrap_or_else(peduli_core::database_file);

        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());

        debug!("Connecting to database: {}", database_url);

        // Configure connection pool
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        // Configure SQLite settings
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        // Run migrations
        sqlx::migrate!("../storage/migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        debug!("Database migrations completed");

        Ok(Self::new(pool))
    }

    /// Close the connection pool, flushing WAL state
    pub async fn shutdown(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}
