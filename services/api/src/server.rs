use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryNotificationLog, InMemoryRegistrationStore};
use crate::routes::with_parking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use parking_desk::approvals::ParkingDeskService;
use parking_desk::config::AppConfig;
use parking_desk::error::AppError;
use parking_desk::telemetry;
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
    if args.strict_lifecycle {
        config.approvals.strict_lifecycle = true;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryRegistrationStore::default());
    let log = Arc::new(InMemoryNotificationLog::default());
    let desk = Arc::new(ParkingDeskService::new(store, log, config.approvals));

    let app = with_parking_routes(desk)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        strict_lifecycle = config.approvals.strict_lifecycle,
        "parking approval desk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
