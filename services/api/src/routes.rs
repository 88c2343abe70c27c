use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use lender_ai::error::AppError;
use lender_ai::workflows::credit::CreditLiabilityImporter;
use lender_ai::workflows::qualification::{
    borrower_router, compute_metrics, snapshot_from_form, BorrowerIntakeForm,
    BorrowerQualificationService, BorrowerRepository, DebtForm, ExportPublisher,
    QualificationMetrics,
};

#[derive(Debug, Deserialize)]
pub(crate) struct QualificationReportRequest {
    pub(crate) form: BorrowerIntakeForm,
    /// Optional credit-report liabilities CSV merged into the debts tab.
    #[serde(default)]
    pub(crate) liabilities_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QualificationReportResponse {
    pub(crate) data_source: ReportDataSource,
    pub(crate) imported_debts: usize,
    pub(crate) metrics: QualificationMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReportDataSource {
    Manual,
    CreditImport,
}

pub(crate) fn with_borrower_routes<R, P>(
    service: Arc<BorrowerQualificationService<R, P>>,
) -> axum::Router
where
    R: BorrowerRepository + 'static,
    P: ExportPublisher + 'static,
{
    borrower_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/qualification/report",
            axum::routing::post(qualification_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless report used by the live-preview form: same parsing boundary,
/// same engine as the stored-borrower path, so the two can never drift.
pub(crate) async fn qualification_report_endpoint(
    Json(payload): Json<QualificationReportRequest>,
) -> Result<Json<QualificationReportResponse>, AppError> {
    let QualificationReportRequest {
        mut form,
        liabilities_csv,
    } = payload;

    let (data_source, imported_debts) = if let Some(csv) = liabilities_csv {
        let reader = Cursor::new(csv.into_bytes());
        let imported = CreditLiabilityImporter::from_reader(reader)?;
        let count = imported.len();
        form.debts.extend(imported.into_iter().map(|debt| DebtForm {
            kind: debt.kind,
            monthly_payment: Some(format!("{:.2}", debt.monthly_payment)),
        }));
        (ReportDataSource::CreditImport, count)
    } else {
        (ReportDataSource::Manual, 0)
    };

    let snapshot = snapshot_from_form(&form);
    let metrics = compute_metrics(&snapshot);

    Ok(Json(QualificationReportResponse {
        data_source,
        imported_debts,
        metrics,
    }))
}
