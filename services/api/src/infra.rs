use metrics_exporter_prometheus::PrometheusHandle;
use permit_engine::workflows::permits::{PermitRecord, PermitStore, ProjectId, StoreError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPermitStore {
    records: Arc<Mutex<HashMap<ProjectId, PermitRecord>>>,
}

impl PermitStore for InMemoryPermitStore {
    fn fetch(&self, id: &ProjectId) -> Result<Option<PermitRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn save(&self, record: PermitRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.project_id.clone(), record);
        Ok(())
    }
}
