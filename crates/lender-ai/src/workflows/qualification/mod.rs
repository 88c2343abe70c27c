//! Borrower intake, qualification math, and the storage/export seams around
//! them.
//!
//! The engine itself is a pure function over an immutable snapshot; callers
//! must always hand it a freshly-read, self-consistent snapshot rather than
//! one mixing fields from concurrent edits.

pub mod domain;
pub mod engine;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Asset, BorrowerFileStatus, BorrowerId, BorrowerSnapshot, Debt, Employer, LoanPurpose,
    OtherIncome, PayStructure, RETIREMENT_ASSET_TYPE,
};
pub use engine::{compute_metrics, PurchasePower, QualificationMetrics, DTI_CEILINGS};
pub use intake::{
    parse_money, parse_rate, snapshot_from_form, AssetForm, BorrowerIntakeForm, DebtForm,
    EmployerForm, OtherIncomeForm,
};
pub use repository::{
    BorrowerRecord, BorrowerRepository, BorrowerSummaryView, ExportError, ExportEvent,
    ExportPublisher, RepositoryError,
};
pub use router::borrower_router;
pub use service::{BorrowerQualificationService, ServiceError};
