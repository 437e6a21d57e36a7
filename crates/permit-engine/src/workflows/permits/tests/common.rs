use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::permits::repository::{PermitRecord, PermitStore, ProjectId, StoreError};
use crate::workflows::permits::{
    FactModel, ImprovementType, PermitDeterminationService, PermitEngine, RawProjectDetails,
    WorkflowTrack,
};

pub(super) fn waterfront_facts() -> FactModel {
    FactModel::new(WorkflowTrack::Waterfront)
}

/// Dock with a mooring pile, $25,000, in the water.
pub(super) fn full_waterfront_facts() -> FactModel {
    waterfront_facts()
        .with_improvements([ImprovementType::Dock, ImprovementType::MooringPile])
        .with_cost_cents(2_500_000)
        .in_water(true)
        .below_high_water_line(false)
}

pub(super) fn waterfront_details() -> RawProjectDetails {
    RawProjectDetails {
        workflow_track: Some("waterfront".to_string()),
        category: Some("new_construction".to_string()),
        improvement_types: vec!["dock".to_string(), "mooring_pile".to_string()],
        estimated_cost: Some("$25,000.00".to_string()),
        in_water: Some(true),
        ..RawProjectDetails::default()
    }
}

pub(super) fn adu_details() -> RawProjectDetails {
    RawProjectDetails {
        workflow_track: Some("adu".to_string()),
        on_sewer: Some(false),
        near_shoreline: Some(false),
        ..RawProjectDetails::default()
    }
}

pub(super) fn build_service() -> (PermitDeterminationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = PermitDeterminationService::new(store.clone(), PermitEngine::standard());
    (service, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<ProjectId, PermitRecord>>>,
    pub(super) writes: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub(super) fn write_count(&self) -> usize {
        *self.writes.lock().expect("store mutex poisoned")
    }
}

impl PermitStore for MemoryStore {
    fn fetch(&self, id: &ProjectId) -> Result<Option<PermitRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn save(&self, record: PermitRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.project_id.clone(), record);
        *self.writes.lock().expect("store mutex poisoned") += 1;
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl PermitStore for UnavailableStore {
    fn fetch(&self, _id: &ProjectId) -> Result<Option<PermitRecord>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn save(&self, _record: PermitRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}
