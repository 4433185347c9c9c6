// Dashboard service - Use cases for listing, looking up and adding dashboards
use crate::application::dashboard_store::{DashboardStore, StoreError};
use crate::domain::dashboard::{Dashboard, DashboardSubmission, MissingRequiredFields};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum AddDashboardError {
    #[error(transparent)]
    MissingRequiredFields(#[from] MissingRequiredFields),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn DashboardStore>,
    // Serializes load -> append -> save so concurrent adds don't lose updates.
    write_lock: Arc<Mutex<()>>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DashboardStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list_dashboards(&self) -> Result<Vec<Dashboard>, StoreError> {
        Ok(self.store.load().await?.dashboards)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Dashboard>, StoreError> {
        let collection = self.store.load().await?;
        Ok(collection.find_by_slug(slug).cloned())
    }

    /// Validate the submission, append it to the end of the collection and
    /// persist the whole collection.
    pub async fn add_dashboard(
        &self,
        submission: DashboardSubmission,
    ) -> Result<Dashboard, AddDashboardError> {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.store.load().await?;
        let dashboard = submission.into_dashboard(collection.next_id(), current_timestamp())?;

        collection.dashboards.push(dashboard.clone());
        self.store.save(&collection).await?;

        tracing::info!(
            id = dashboard.id,
            slug = %dashboard.slug,
            "Dashboard added"
        );

        Ok(dashboard)
    }
}

/// Local time in ISO 8601 with microseconds, e.g. `2025-03-01T09:30:12.123456`.
fn current_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
