use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diagnostics::InconsistentFactsWarning;
use super::summary::Summary;

/// Identifier wrapper for the project whose permits are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Last persisted determination for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitRecord {
    pub project_id: ProjectId,
    pub summary: Summary,
    pub diagnostics: Vec<InconsistentFactsWarning>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction so the determination service can be exercised in isolation.
pub trait PermitStore: Send + Sync {
    fn fetch(&self, id: &ProjectId) -> Result<Option<PermitRecord>, StoreError>;
    fn save(&self, record: PermitRecord) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("permit store unavailable: {0}")]
    Unavailable(String),
}
