use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{BorrowerFileStatus, BorrowerId};
use super::engine::{self, QualificationMetrics};
use super::intake::{snapshot_from_form, BorrowerIntakeForm};
use super::repository::{
    BorrowerRecord, BorrowerRepository, ExportError, ExportEvent, ExportPublisher, RepositoryError,
};

/// Service composing the intake boundary, the qualification engine, and the
/// repository/export seams.
pub struct BorrowerQualificationService<R, P> {
    repository: Arc<R>,
    exports: Arc<P>,
}

static BORROWER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_borrower_id() -> BorrowerId {
    let id = BORROWER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    BorrowerId(format!("brw-{id:06}"))
}

impl<R, P> BorrowerQualificationService<R, P>
where
    R: BorrowerRepository + 'static,
    P: ExportPublisher + 'static,
{
    pub fn new(repository: Arc<R>, exports: Arc<P>) -> Self {
        Self {
            repository,
            exports,
        }
    }

    /// Open a new borrower file from a raw interview form. Parsing happens
    /// here, once; the stored snapshot is fully typed.
    pub fn intake(&self, form: BorrowerIntakeForm) -> Result<BorrowerRecord, ServiceError> {
        let snapshot = snapshot_from_form(&form);
        let record = BorrowerRecord {
            id: next_borrower_id(),
            snapshot,
            metrics: None,
            status: BorrowerFileStatus::Intake,
            updated_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(borrower_id = %stored.id.0, "borrower file opened");
        Ok(stored)
    }

    /// Replace the snapshot from a re-submitted form. Cached metrics are
    /// dropped and the file demotes back to intake; metrics computed from a
    /// superseded snapshot must never be served.
    pub fn update(
        &self,
        borrower_id: &BorrowerId,
        form: BorrowerIntakeForm,
    ) -> Result<BorrowerRecord, ServiceError> {
        let mut record = self
            .repository
            .fetch(borrower_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.snapshot = snapshot_from_form(&form);
        record.metrics = None;
        record.status = BorrowerFileStatus::Intake;
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Run the engine against the freshly fetched snapshot, cache the result,
    /// and return it.
    pub fn qualify(
        &self,
        borrower_id: &BorrowerId,
    ) -> Result<QualificationMetrics, ServiceError> {
        let mut record = self
            .repository
            .fetch(borrower_id)?
            .ok_or(RepositoryError::NotFound)?;

        let metrics = engine::compute_metrics(&record.snapshot);

        record.metrics = Some(metrics.clone());
        record.status = BorrowerFileStatus::Qualified;
        record.updated_at = Utc::now();
        self.repository.update(record)?;

        info!(
            borrower_id = %borrower_id.0,
            total_monthly_income = metrics.total_monthly_income,
            back_end_dti = metrics.back_end_dti,
            "borrower qualified"
        );

        Ok(metrics)
    }

    /// Publish the cached metrics to the configured destination. Requires a
    /// prior `qualify` run against the current snapshot.
    pub fn export(
        &self,
        borrower_id: &BorrowerId,
        destination: &str,
    ) -> Result<ExportEvent, ServiceError> {
        let mut record = self
            .repository
            .fetch(borrower_id)?
            .ok_or(RepositoryError::NotFound)?;

        let metrics = record
            .metrics
            .clone()
            .ok_or(ServiceError::MetricsNotReady)?;

        let mut details = BTreeMap::new();
        details.insert(
            "total_monthly_income".to_string(),
            format!("{:.2}", metrics.total_monthly_income),
        );
        details.insert(
            "loan_amount".to_string(),
            format!("{:.2}", metrics.loan_amount),
        );
        details.insert(
            "total_piti".to_string(),
            format!("{:.2}", metrics.total_piti),
        );
        details.insert(
            "back_end_dti".to_string(),
            format!("{:.2}", metrics.back_end_dti),
        );

        let event = ExportEvent {
            destination: destination.to_string(),
            borrower_id: borrower_id.clone(),
            details,
        };
        self.exports.publish(event.clone())?;

        record.status = BorrowerFileStatus::Exported;
        record.updated_at = Utc::now();
        self.repository.update(record)?;

        Ok(event)
    }

    /// Fetch a borrower file for API responses.
    pub fn get(&self, borrower_id: &BorrowerId) -> Result<BorrowerRecord, ServiceError> {
        let record = self
            .repository
            .fetch(borrower_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the qualification service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("metrics have not been computed for the current snapshot")]
    MetricsNotReady,
}
