use crate::cli::ServeArgs;
use crate::infra::{analysis_service, AppState};
use crate::routes::with_forensic_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_forensics::config::AppConfig;
use credit_forensics::error::AppError;
use credit_forensics::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(analysis_service(config.analysis));

    let app = with_forensic_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        instrument = config.analysis.default_instrument.label(),
        max_accounts = config.analysis.max_accounts_per_bureau,
        "credit forensics service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
