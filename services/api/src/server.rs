use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryActivityLog, InMemoryConsultationRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use consult_intake::config::AppConfig;
use consult_intake::error::AppError;
use consult_intake::telemetry;
use consult_intake::workflows::activity::ActivityFeed;
use consult_intake::workflows::admin::AdminSessions;
use consult_intake::workflows::consultations::ConsultationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    let repository = Arc::new(InMemoryConsultationRepository::default());
    let activity_log = Arc::new(InMemoryActivityLog::default());
    let consultations = Arc::new(ConsultationService::new(repository, activity_log.clone()));
    let activity = Arc::new(ActivityFeed::new(activity_log));

    if !config.admin.login_enabled() {
        warn!("APP_ADMIN_PASSWORD is not set; admin routes will reject every request");
    }
    let sessions = Arc::new(AdminSessions::new(config.admin.clone()));

    let app = with_service_routes(consultations, activity, sessions)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "consultation intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
