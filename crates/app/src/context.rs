//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    config::{DatastoreConfig, DatastoreKind},
    database::{self, InvalidTableName, TableName},
    domain::carts::{
        CartsManager, KvCartsManager,
        repositories::{
            CartRecordsRepository, DynamoCartRecordsRepository, MemoryCartRecordsRepository,
            PgCartRecordsRepository,
        },
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("DATABASE_URL is required for the postgres datastore")]
    MissingDatabaseUrl,

    #[error("invalid table name: {0}")]
    InvalidTableName(#[from] InvalidTableName),

    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsManager>,
}

impl AppContext {
    /// Build application context around an existing carts manager.
    #[must_use]
    pub fn new(carts: Arc<dyn CartsManager>) -> Self {
        Self { carts }
    }

    /// Build application context for the configured datastore.
    ///
    /// # Errors
    ///
    /// Returns an error when the datastore settings are incomplete or invalid,
    /// or when connecting to `PostgreSQL` or creating its table fails.
    pub async fn from_config(config: &DatastoreConfig) -> Result<Self, AppInitError> {
        let records: Arc<dyn CartRecordsRepository> = match config.datastore {
            DatastoreKind::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or(AppInitError::MissingDatabaseUrl)?;

                let table = TableName::parse(&config.table)?;

                let pool = database::connect(url)
                    .await
                    .map_err(AppInitError::Database)?;

                let repository = PgCartRecordsRepository::new(pool, &table);

                repository
                    .ensure_table()
                    .await
                    .map_err(AppInitError::Database)?;

                Arc::new(repository)
            }
            DatastoreKind::DynamoDb => Arc::new(
                DynamoCartRecordsRepository::connect(
                    config.table.clone(),
                    config.region.clone(),
                    config.dynamo_url.clone(),
                )
                .await,
            ),
            DatastoreKind::Memory => Arc::new(MemoryCartRecordsRepository::new()),
        };

        info!(datastore = ?config.datastore, table = %config.table, "datastore ready");

        Ok(Self::new(Arc::new(KvCartsManager::new(
            records,
            config.timeout(),
        ))))
    }
}
