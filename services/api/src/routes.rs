use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use consult_intake::workflows::activity::{activity_router, ActivityFeed, ActivityLog};
use consult_intake::workflows::admin::{admin_router, AdminSessions};
use consult_intake::workflows::consultations::{
    consultation_router, ConsultationRepository, ConsultationService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<R, L>(
    consultations: Arc<ConsultationService<R, L>>,
    activity: Arc<ActivityFeed<L>>,
    sessions: Arc<AdminSessions>,
) -> axum::Router
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    consultation_router(consultations, sessions.clone())
        .merge(activity_router(activity, sessions.clone()))
        .merge(admin_router(sessions))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
