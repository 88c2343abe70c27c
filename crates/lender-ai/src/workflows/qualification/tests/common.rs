use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::qualification::domain::{
    Asset, BorrowerId, BorrowerSnapshot, Debt, Employer, LoanPurpose, OtherIncome, PayStructure,
};
use crate::workflows::qualification::intake::{BorrowerIntakeForm, DebtForm, EmployerForm};
use crate::workflows::qualification::repository::{
    BorrowerRecord, BorrowerRepository, ExportError, ExportEvent, ExportPublisher, RepositoryError,
};
use crate::workflows::qualification::service::BorrowerQualificationService;

#[derive(Default, Clone)]
pub(super) struct InMemoryRepository {
    records: Arc<Mutex<HashMap<BorrowerId, BorrowerRecord>>>,
}

impl BorrowerRepository for InMemoryRepository {
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
pub(super) struct RecordingExportPublisher {
    events: Arc<Mutex<Vec<ExportEvent>>>,
}

impl ExportPublisher for RecordingExportPublisher {
    fn publish(&self, event: ExportEvent) -> Result<(), ExportError> {
        let mut guard = self.events.lock().expect("export mutex poisoned");
        guard.push(event);
        Ok(())
    }
}

impl RecordingExportPublisher {
    pub(super) fn events(&self) -> Vec<ExportEvent> {
        self.events.lock().expect("export mutex poisoned").clone()
    }
}

pub(super) type TestService =
    BorrowerQualificationService<InMemoryRepository, RecordingExportPublisher>;

pub(super) fn service() -> (Arc<TestService>, RecordingExportPublisher) {
    let repository = Arc::new(InMemoryRepository::default());
    let exports = RecordingExportPublisher::default();
    let service = Arc::new(BorrowerQualificationService::new(
        repository,
        Arc::new(exports.clone()),
    ));
    (service, exports)
}

/// Repository double whose inserts always collide.
pub(super) struct ConflictRepository;

impl BorrowerRepository for ConflictRepository {
    fn insert(&self, _record: BorrowerRecord) -> Result<BorrowerRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: BorrowerRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &BorrowerId) -> Result<Option<BorrowerRecord>, RepositoryError> {
        Ok(None)
    }

    fn active(&self, _limit: usize) -> Result<Vec<BorrowerRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Repository double simulating a backend outage.
pub(super) struct UnavailableRepository;

impl BorrowerRepository for UnavailableRepository {
    fn insert(&self, _record: BorrowerRecord) -> Result<BorrowerRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn update(&self, _record: BorrowerRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn fetch(&self, _id: &BorrowerId) -> Result<Option<BorrowerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn active(&self, _limit: usize) -> Result<Vec<BorrowerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_conflict(response: &Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) fn salaried(name: &str, annual_amount: f64) -> Employer {
    Employer {
        name: name.to_string(),
        pay: PayStructure::Salaried { annual_amount },
        overtime_monthly: 0.0,
        bonus_monthly: 0.0,
        commission_monthly: 0.0,
        is_previous: false,
    }
}

pub(super) fn empty_snapshot() -> BorrowerSnapshot {
    BorrowerSnapshot {
        has_co_borrower: false,
        primary_employers: Vec::new(),
        co_employers: Vec::new(),
        primary_other_income: Vec::new(),
        co_other_income: Vec::new(),
        assets: Vec::new(),
        debts: Vec::new(),
        loan_purpose: LoanPurpose::Purchase {
            purchase_price: 0.0,
            down_payment_amount: 0.0,
        },
        interest_rate_percent: 0.0,
        property_taxes_annual: 0.0,
        insurance_annual: 0.0,
        hoa_monthly: 0.0,
    }
}

/// Single borrower, one salaried employer at $84k, one $400 debt, buying a
/// $350k home with 5% down at 6.5%, $3k taxes and $1.2k insurance annually.
pub(super) fn scenario_snapshot() -> BorrowerSnapshot {
    BorrowerSnapshot {
        primary_employers: vec![salaried("Cedar Clinic", 84_000.0)],
        debts: vec![Debt {
            kind: "auto loan".to_string(),
            monthly_payment: 400.0,
        }],
        loan_purpose: LoanPurpose::Purchase {
            purchase_price: 350_000.0,
            down_payment_amount: 17_500.0,
        },
        interest_rate_percent: 6.5,
        property_taxes_annual: 3_000.0,
        insurance_annual: 1_200.0,
        ..empty_snapshot()
    }
}

/// The same scenario as [`scenario_snapshot`] expressed as a raw form.
pub(super) fn scenario_form() -> BorrowerIntakeForm {
    BorrowerIntakeForm {
        primary_employers: vec![EmployerForm {
            name: "Cedar Clinic".to_string(),
            pay_type: Some("salary".to_string()),
            salary_amount: Some("$84,000".to_string()),
            salary_frequency: Some("annual".to_string()),
            ..EmployerForm::default()
        }],
        debts: vec![DebtForm {
            kind: "auto loan".to_string(),
            monthly_payment: Some("400".to_string()),
        }],
        loan_purpose: Some("purchase".to_string()),
        purchase_price: Some("350000".to_string()),
        down_payment_amount: Some("17500".to_string()),
        interest_rate: Some("6.5".to_string()),
        property_taxes_annual: Some("3000".to_string()),
        insurance_annual: Some("1200".to_string()),
        ..BorrowerIntakeForm::default()
    }
}

pub(super) fn other_income(source: &str, monthly_amount: f64) -> OtherIncome {
    OtherIncome {
        source: source.to_string(),
        monthly_amount,
    }
}

pub(super) fn asset(kind: &str, balance: f64) -> Asset {
    Asset {
        kind: kind.to_string(),
        balance,
    }
}
