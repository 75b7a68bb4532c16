use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ConsultationForm, ConsultationId, ConsultationStatus, FormOptions};
use super::repository::{
    ConsultationFilter, ConsultationOrder, ConsultationRepository, RepositoryError,
};
use super::service::{ConsultationService, ConsultationServiceError};
use crate::workflows::activity::ActivityLog;
use crate::workflows::admin::{auth_failure, AdminSessions};

/// Shared state for the consultation routes.
pub struct ConsultationApi<R, L> {
    pub service: Arc<ConsultationService<R, L>>,
    pub sessions: Arc<AdminSessions>,
}

impl<R, L> Clone for ConsultationApi<R, L> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Query string accepted by the admin listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub status: Option<ConsultationStatus>,
    pub urgency: Option<String>,
    pub industry: Option<String>,
    pub search: Option<String>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    pub order: Option<ConsultationOrder>,
}

impl ListQuery {
    fn into_parts(self) -> (ConsultationFilter, ConsultationOrder) {
        let filter = ConsultationFilter {
            statuses: self.status.into_iter().collect(),
            urgency: self.urgency,
            industry: self.industry,
            search: self.search,
            created_from: self.created_from,
            created_to: self.created_to,
        };
        (filter, self.order.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ConsultationStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

/// Router builder exposing public intake and admin management endpoints.
pub fn consultation_router<R, L>(
    service: Arc<ConsultationService<R, L>>,
    sessions: Arc<AdminSessions>,
) -> Router
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    Router::new()
        .route(
            "/api/v1/consultations",
            get(list_handler::<R, L>).post(submit_handler::<R, L>),
        )
        .route("/api/v1/consultations/options", get(options_handler))
        .route("/api/v1/consultations/stats", get(stats_handler::<R, L>))
        .route(
            "/api/v1/consultations/upcoming",
            get(upcoming_handler::<R, L>),
        )
        .route(
            "/api/v1/consultations/:consultation_id",
            get(detail_handler::<R, L>).delete(delete_handler::<R, L>),
        )
        .route(
            "/api/v1/consultations/:consultation_id/status",
            patch(status_handler::<R, L>),
        )
        .with_state(ConsultationApi { service, sessions })
}

pub(crate) async fn submit_handler<R, L>(
    State(api): State<ConsultationApi<R, L>>,
    Json(form): Json<ConsultationForm>,
) -> Response
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    match api.service.submit(form) {
        Ok(record) => (StatusCode::CREATED, Json(record.summary())).into_response(),
        Err(ConsultationServiceError::Validation(errors)) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => {
            tracing::error!(error = %other, "consultation submission failed");
            let payload = json!({ "error": "submission failed" });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn options_handler() -> Json<FormOptions> {
    Json(FormOptions::standard())
}

pub(crate) async fn list_handler<R, L>(
    State(api): State<ConsultationApi<R, L>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    let (filter, order) = query.into_parts();
    match api.service.list(&filter, order) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(error) => service_failure(error),
    }
}

pub(crate) async fn stats_handler<R, L>(
    State(api): State<ConsultationApi<R, L>>,
    headers: HeaderMap,
) -> Response
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.service.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(error) => service_failure(error),
    }
}

pub(crate) async fn upcoming_handler<R, L>(
    State(api): State<ConsultationApi<R, L>>,
    headers: HeaderMap,
) -> Response
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.service.upcoming() {
        Ok(records) => {
            let summaries: Vec<_> = records.iter().map(|record| record.summary()).collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(error) => service_failure(error),
    }
}

pub(crate) async fn detail_handler<R, L>(
    State(api): State<ConsultationApi<R, L>>,
    headers: HeaderMap,
    Path(consultation_id): Path<String>,
) -> Response
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.service.get(&ConsultationId(consultation_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => service_failure(error),
    }
}

pub(crate) async fn status_handler<R, L>(
    State(api): State<ConsultationApi<R, L>>,
    headers: HeaderMap,
    Path(consultation_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    let id = ConsultationId(consultation_id);
    match api
        .service
        .update_status(&id, update.status, update.admin_notes)
    {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => service_failure(error),
    }
}

pub(crate) async fn delete_handler<R, L>(
    State(api): State<ConsultationApi<R, L>>,
    headers: HeaderMap,
    Path(consultation_id): Path<String>,
) -> Response
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.service.delete(&ConsultationId(consultation_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => service_failure(error),
    }
}

fn service_failure(error: ConsultationServiceError) -> Response {
    let status = match &error {
        ConsultationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ConsultationServiceError::InvalidTransition { .. } => StatusCode::CONFLICT,
        ConsultationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ConsultationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ConsultationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
