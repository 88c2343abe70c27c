use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{BorrowerFileStatus, BorrowerId, BorrowerSnapshot};
use super::engine::QualificationMetrics;

/// Repository record for one borrower file.
///
/// `metrics` is a cache of the last engine run; the snapshot is the only
/// source of truth and any snapshot edit must drop the cache so stale ratios
/// are never served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowerRecord {
    pub id: BorrowerId,
    pub snapshot: BorrowerSnapshot,
    pub metrics: Option<QualificationMetrics>,
    pub status: BorrowerFileStatus,
    pub updated_at: DateTime<Utc>,
}

impl BorrowerRecord {
    pub fn summary_view(&self) -> BorrowerSummaryView {
        BorrowerSummaryView {
            borrower_id: self.id.clone(),
            status: self.status.label(),
            loan_purpose: self.snapshot.loan_purpose.label(),
            total_monthly_income: self
                .metrics
                .as_ref()
                .map(|metrics| metrics.total_monthly_income),
            back_end_dti: self.metrics.as_ref().map(|metrics| metrics.back_end_dti),
            total_piti: self.metrics.as_ref().map(|metrics| metrics.total_piti),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait BorrowerRepository: Send + Sync {
    fn insert(&self, record: BorrowerRecord) -> Result<BorrowerRecord, RepositoryError>;
    fn update(&self, record: BorrowerRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &BorrowerId) -> Result<Option<BorrowerRecord>, RepositoryError>;
    fn active(&self, limit: usize) -> Result<Vec<BorrowerRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing the outbound hand-off seam (LOS push, CRM webhook,
/// client letter queue). Payload mapping to any concrete third party lives
/// behind the adapter, not here.
pub trait ExportPublisher: Send + Sync {
    fn publish(&self, event: ExportEvent) -> Result<(), ExportError>;
}

/// Generic export payload so routes/tests can assert the hand-off boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEvent {
    pub destination: String,
    pub borrower_id: BorrowerId,
    pub details: BTreeMap<String, String>,
}

/// Export dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a borrower file's exposed state.
#[derive(Debug, Clone, Serialize)]
pub struct BorrowerSummaryView {
    pub borrower_id: BorrowerId,
    pub status: &'static str,
    pub loan_purpose: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_monthly_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_end_dti: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_piti: Option<f64>,
}
