use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::diagnostics::ConfigurationError;
use super::domain::PermitKind;
use super::facts::RawProjectDetails;
use super::repository::{PermitRecord, PermitStore, ProjectId, StoreError};
use super::summary::explain;
use super::{Determination, PermitEngine};

/// Runs the engine for a project and persists the summary only when it
/// differs from what is already stored.
pub struct PermitDeterminationService<S> {
    engine: Arc<PermitEngine>,
    store: Arc<S>,
}

impl<S> PermitDeterminationService<S>
where
    S: PermitStore + 'static,
{
    pub fn new(store: Arc<S>, engine: PermitEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
        }
    }

    pub fn engine(&self) -> &PermitEngine {
        &self.engine
    }

    pub fn determine(
        &self,
        project_id: &ProjectId,
        details: &RawProjectDetails,
    ) -> Result<DeterminationOutcome, DeterminationServiceError> {
        let determination = self.engine.evaluate(details)?;

        let unchanged = self
            .store
            .fetch(project_id)?
            .map(|stored| {
                stored.summary == determination.summary
                    && stored.diagnostics == determination.diagnostics
            })
            .unwrap_or(false);

        if unchanged {
            info!(project = %project_id.0, "permit determination unchanged; skipping write");
        } else {
            self.store.save(PermitRecord {
                project_id: project_id.clone(),
                summary: determination.summary.clone(),
                diagnostics: determination.diagnostics.clone(),
                updated_at: Utc::now(),
            })?;
            info!(
                project = %project_id.0,
                permits = determination.summary.all_permits.len(),
                "permit determination persisted"
            );
        }

        Ok(DeterminationOutcome {
            project_id: project_id.clone(),
            persisted: !unchanged,
            determination,
        })
    }

    pub fn current(&self, project_id: &ProjectId) -> Result<PermitRecord, DeterminationServiceError> {
        let record = self
            .store
            .fetch(project_id)?
            .ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    pub fn explain(
        &self,
        project_id: &ProjectId,
        permit: PermitKind,
    ) -> Result<Option<String>, DeterminationServiceError> {
        let record = self.current(project_id)?;
        Ok(explain(permit, &record.summary).map(str::to_string))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeterminationOutcome {
    pub project_id: ProjectId,
    pub persisted: bool,
    #[serde(flatten)]
    pub determination: Determination,
}

#[derive(Debug, thiserror::Error)]
pub enum DeterminationServiceError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
