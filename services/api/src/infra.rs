use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use lender_ai::workflows::qualification::{
    BorrowerId, BorrowerRecord, BorrowerRepository, ExportError, ExportEvent, ExportPublisher,
    RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBorrowerRepository {
    records: Arc<Mutex<HashMap<BorrowerId, BorrowerRecord>>>,
}

impl BorrowerRepository for InMemoryBorrowerRepository {
    fn insert(&self, record: BorrowerRecord) -> Result<BorrowerRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: BorrowerRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &BorrowerId) -> Result<Option<BorrowerRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn active(&self, limit: usize) -> Result<Vec<BorrowerRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().take(limit).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryExportPublisher {
    events: Arc<Mutex<Vec<ExportEvent>>>,
}

impl ExportPublisher for InMemoryExportPublisher {
    fn publish(&self, event: ExportEvent) -> Result<(), ExportError> {
        let mut guard = self.events.lock().expect("export mutex poisoned");
        guard.push(event);
        Ok(())
    }
}

impl InMemoryExportPublisher {
    pub(crate) fn events(&self) -> Vec<ExportEvent> {
        self.events.lock().expect("export mutex poisoned").clone()
    }
}
