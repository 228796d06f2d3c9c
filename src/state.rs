use crate::config::AppConfig;
use crate::db::Store;
use crate::storage::StorageClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    pub fn from_parts(
        store: Arc<dyn Store>,
        config: Arc<AppConfig>,
        storage: Arc<dyn StorageClient>,
    ) -> Self {
        Self {
            store,
            config,
            storage,
        }
    }

    /// In-memory store and fake object storage; see [`crate::testing`].
    #[cfg(test)]
    pub fn fake() -> Self {
        crate::testing::fake_parts().0
    }
}
