use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BorrowerFileStatus, BorrowerId};
use super::intake::BorrowerIntakeForm;
use super::repository::{BorrowerRepository, ExportPublisher, RepositoryError};
use super::service::{BorrowerQualificationService, ServiceError};

/// Router builder exposing HTTP endpoints for the borrower workflow.
pub fn borrower_router<R, P>(service: Arc<BorrowerQualificationService<R, P>>) -> Router
where
    R: BorrowerRepository + 'static,
    P: ExportPublisher + 'static,
{
    Router::new()
        .route("/api/v1/borrowers", post(intake_handler::<R, P>))
        .route(
            "/api/v1/borrowers/:borrower_id",
            get(status_handler::<R, P>).put(update_handler::<R, P>),
        )
        .route(
            "/api/v1/borrowers/:borrower_id/qualify",
            post(qualify_handler::<R, P>),
        )
        .route(
            "/api/v1/borrowers/:borrower_id/export",
            post(export_handler::<R, P>),
        )
        .with_state(service)
}

pub(crate) async fn intake_handler<R, P>(
    State(service): State<Arc<BorrowerQualificationService<R, P>>>,
    axum::Json(form): axum::Json<BorrowerIntakeForm>,
) -> Response
where
    R: BorrowerRepository + 'static,
    P: ExportPublisher + 'static,
{
    match service.intake(form) {
        Ok(record) => {
            let view = record.summary_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(ServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "borrower file already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<R, P>(
    State(service): State<Arc<BorrowerQualificationService<R, P>>>,
    Path(borrower_id): Path<String>,
) -> Response
where
    R: BorrowerRepository + 'static,
    P: ExportPublisher + 'static,
{
    let id = BorrowerId(borrower_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.summary_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "borrower_id": id.0,
                "status": BorrowerFileStatus::Intake.label(),
                "total_monthly_income": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn update_handler<R, P>(
    State(service): State<Arc<BorrowerQualificationService<R, P>>>,
    Path(borrower_id): Path<String>,
    axum::Json(form): axum::Json<BorrowerIntakeForm>,
) -> Response
where
    R: BorrowerRepository + 'static,
    P: ExportPublisher + 'static,
{
    let id = BorrowerId(borrower_id);
    match service.update(&id, form) {
        Ok(record) => {
            let view = record.summary_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn qualify_handler<R, P>(
    State(service): State<Arc<BorrowerQualificationService<R, P>>>,
    Path(borrower_id): Path<String>,
) -> Response
where
    R: BorrowerRepository + 'static,
    P: ExportPublisher + 'static,
{
    let id = BorrowerId(borrower_id);
    match service.qualify(&id) {
        Ok(metrics) => (StatusCode::OK, axum::Json(metrics)).into_response(),
        Err(ServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportRequest {
    #[serde(default = "default_destination")]
    destination: String,
}

fn default_destination() -> String {
    "crm".to_string()
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            destination: default_destination(),
        }
    }
}

// The body is optional so a bare POST exports to the default destination.
pub(crate) async fn export_handler<R, P>(
    State(service): State<Arc<BorrowerQualificationService<R, P>>>,
    Path(borrower_id): Path<String>,
    request: Option<axum::Json<ExportRequest>>,
) -> Response
where
    R: BorrowerRepository + 'static,
    P: ExportPublisher + 'static,
{
    let request = request.map(|axum::Json(request)| request).unwrap_or_default();
    let id = BorrowerId(borrower_id);
    match service.export(&id, &request.destination) {
        Ok(event) => (StatusCode::ACCEPTED, axum::Json(event)).into_response(),
        Err(ServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(ServiceError::MetricsNotReady) => {
            let payload = json!({
                "error": "qualify the borrower before exporting",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn not_found(id: &BorrowerId) -> Response {
    let payload = json!({
        "error": format!("borrower file '{}' not found", id.0),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: ServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
