use std::sync::Arc;

use crate::db::Store;
use crate::services::generation::GenerationGateway;
use crate::services::jobs::JobManager;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub gateway: Arc<GenerationGateway>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, gateway: GenerationGateway) -> Self {
        Self {
            store,
            gateway: Arc::new(gateway),
        }
    }

    /// Job lifecycle manager borrowing this state for one request.
    pub fn jobs(&self) -> JobManager<'_> {
        JobManager::new(self.store.as_ref(), &self.gateway)
    }
}
