use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryBorrowerRepository, InMemoryExportPublisher};
use crate::routes::with_borrower_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lender_ai::config::AppConfig;
use lender_ai::error::AppError;
use lender_ai::telemetry;
use lender_ai::workflows::qualification::BorrowerQualificationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryBorrowerRepository::default());
    let exports = Arc::new(InMemoryExportPublisher::default());
    let qualification_service = Arc::new(BorrowerQualificationService::new(repository, exports));

    let app = with_borrower_routes(qualification_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "borrower qualification service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
