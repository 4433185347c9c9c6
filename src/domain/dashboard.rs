// Dashboard domain model
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named pointer to an externally hosted, embeddable report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub embed_url: String,
    #[serde(default)]
    pub dataset_url: Option<String>,
    #[serde(default)]
    pub pbix_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    /// Keys this app doesn't know about, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The persisted document: `{"dashboards": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardCollection {
    #[serde(default)]
    pub dashboards: Vec<Dashboard>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardCollection {
    /// First record in sequence order whose slug matches. Slugs are not unique.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Dashboard> {
        self.dashboards.iter().find(|d| d.slug == slug)
    }

    pub fn next_id(&self) -> u64 {
        self.dashboards.len() as u64 + 1
    }

    pub fn len(&self) -> usize {
        self.dashboards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dashboards.is_empty()
    }
}

/// Raw values submitted through the add form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub dataset_url: Option<String>,
    #[serde(default)]
    pub pbix_url: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fill in all required fields (name, slug, embed_url)")]
pub struct MissingRequiredFields;

impl DashboardSubmission {
    /// Builds the record to append. `name`, `slug` and `embed_url` must be non-empty.
    pub fn into_dashboard(self, id: u64, created_at: String) -> Result<Dashboard, MissingRequiredFields> {
        let (name, slug, embed_url) = match (
            non_empty(self.name),
            non_empty(self.slug),
            non_empty(self.embed_url),
        ) {
            (Some(name), Some(slug), Some(embed_url)) => (name, slug, embed_url),
            _ => return Err(MissingRequiredFields),
        };

        Ok(Dashboard {
            id,
            name,
            slug,
            description: self.description,
            embed_url,
            dataset_url: self.dataset_url,
            pbix_url: self.pbix_url,
            tags: parse_tags(self.tags.as_deref().unwrap_or_default()),
            created_at,
            extra: Map::new(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Split a comma-separated tag list, trimming each entry and dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
