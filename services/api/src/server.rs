use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPermitStore};
use crate::routes::with_permit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use permit_engine::config::AppConfig;
use permit_engine::error::AppError;
use permit_engine::telemetry;
use permit_engine::workflows::permits::{PermitDeterminationService, PermitEngine};
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

    let store = Arc::new(InMemoryPermitStore::default());
    let engine = PermitEngine::with_thresholds(config.thresholds);
    let determination_service = Arc::new(PermitDeterminationService::new(store, engine));

    let app = with_permit_routes(determination_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        shoreline_exemption_max_cents = config.thresholds.shoreline_exemption_max_cents,
        "permit engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
