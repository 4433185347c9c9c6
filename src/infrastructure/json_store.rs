// JSON file repository implementation
use crate::application::dashboard_store::{DashboardStore, StoreError};
use crate::domain::dashboard::DashboardCollection;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the whole collection as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "dashboards.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DashboardStore for JsonFileStore {
    async fn load(&self) -> Result<DashboardCollection, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Dashboard file missing, starting empty");
                return Ok(DashboardCollection::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(StoreError::Parse)
    }

    async fn save(&self, collection: &DashboardCollection) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(collection).map_err(StoreError::Serialize)?;

        // Write beside the target and rename so readers never see a partial file.
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}
