// Repository trait for dashboard persistence
use crate::domain::dashboard::DashboardCollection;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access dashboard file: {0}")]
    Io(#[from] std::io::Error),
    #[error("dashboard file is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize dashboards: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Whole-document persistence: every load reads the full collection and
/// every save rewrites it.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Load the collection. A missing backing document is an empty collection.
    async fn load(&self) -> Result<DashboardCollection, StoreError>;

    /// Overwrite the backing document with `collection`.
    async fn save(&self, collection: &DashboardCollection) -> Result<(), StoreError>;
}
