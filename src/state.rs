//! Shared application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    db::{create_db_pool, ensure_schema, PostgresQuestionStore},
    services::{CrudService, ImportService, SearchService},
    Result,
};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub crud_service: Arc<CrudService>,
    pub search_service: Arc<SearchService>,
    pub import_service: Arc<ImportService>,
}

impl AppState {
    /// Initialize the application state
    pub async fn new(config: Config) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let config = Arc::new(config);

        let db_pool = create_db_pool(&config).await?;
        ensure_schema(&db_pool).await?;

        let store = PostgresQuestionStore::new(db_pool.clone());
        let crud_service = Arc::new(CrudService::new(store.clone()));
        let search_service = Arc::new(SearchService::new(store.clone()));
        let import_service = Arc::new(ImportService::new(store));

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            config,
            db_pool,
            crud_service,
            search_service,
            import_service,
        })
    }
}
