//! Application state management

use crate::ServerConfig;
use checkin_core::Result;
use checkin_engine::{CheckinService, SessionProvider};
use checkin_persistence::{Database, PageCache};
use std::sync::Arc;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub sessions: Arc<dyn SessionProvider>,
    pub service: Arc<CheckinService>,
    /// Per-user point balances of the `/` page; dropped after each check-in
    pub page_cache: Arc<PageCache>,
}

impl AppState {
    /// Wire the service to the database and page cache
    pub fn new(db: Arc<Database>, page_cache: Arc<PageCache>) -> Self {
        let service = CheckinService::new(db.clone(), db.clone(), page_cache.clone());
        Self::with_service(db, page_cache, service)
    }

    /// Use a pre-built service (custom clock, alternative stores)
    pub fn with_service(db: Arc<Database>, page_cache: Arc<PageCache>, service: CheckinService) -> Self {
        Self {
            sessions: db.clone(),
            db,
            service: Arc::new(service),
            page_cache,
        }
    }

    /// Open the configured database and build the state around it
    pub async fn connect(config: &ServerConfig) -> Result<Self> {
        let db = Database::connect(&config.database_path()).await?;
        let page_cache = PageCache::with_capacity(config.cache_ttl(), config.cache_max_entries);
        Ok(Self::new(Arc::new(db), Arc::new(page_cache)))
    }
}
