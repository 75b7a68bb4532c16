use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{ActivityFilter, ActivityId, NewActivity};
use super::feed::{ActivityFeed, ActivityFeedError};
use super::store::{ActivityLog, ActivityLogError};
use crate::workflows::admin::{auth_failure, AdminSessions};

/// Shared state for the activity routes.
pub struct ActivityApi<L> {
    pub feed: Arc<ActivityFeed<L>>,
    pub sessions: Arc<AdminSessions>,
}

impl<L> Clone for ActivityApi<L> {
    fn clone(&self) -> Self {
        Self {
            feed: self.feed.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Admin-only routes over the activity feed.
pub fn activity_router<L>(feed: Arc<ActivityFeed<L>>, sessions: Arc<AdminSessions>) -> Router
where
    L: ActivityLog + 'static,
{
    Router::new()
        .route(
            "/api/v1/activity",
            get(list_handler::<L>).post(create_handler::<L>),
        )
        .route("/api/v1/activity/stats", get(stats_handler::<L>))
        .route(
            "/api/v1/activity/:activity_id/complete",
            post(complete_handler::<L>),
        )
        .route("/api/v1/activity/:activity_id", delete(delete_handler::<L>))
        .with_state(ActivityApi { feed, sessions })
}

pub(crate) async fn list_handler<L>(
    State(api): State<ActivityApi<L>>,
    headers: HeaderMap,
    Query(filter): Query<ActivityFilter>,
) -> Response
where
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.feed.list(&filter) {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(error) => feed_failure(error),
    }
}

pub(crate) async fn create_handler<L>(
    State(api): State<ActivityApi<L>>,
    headers: HeaderMap,
    Json(activity): Json<NewActivity>,
) -> Response
where
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.feed.record(activity) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => feed_failure(error),
    }
}

pub(crate) async fn stats_handler<L>(
    State(api): State<ActivityApi<L>>,
    headers: HeaderMap,
) -> Response
where
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.feed.stats(Local::now()) {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(error) => feed_failure(error),
    }
}

pub(crate) async fn complete_handler<L>(
    State(api): State<ActivityApi<L>>,
    headers: HeaderMap,
    Path(activity_id): Path<u64>,
) -> Response
where
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.feed.complete(ActivityId(activity_id)) {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(error) => feed_failure(error),
    }
}

pub(crate) async fn delete_handler<L>(
    State(api): State<ActivityApi<L>>,
    headers: HeaderMap,
    Path(activity_id): Path<u64>,
) -> Response
where
    L: ActivityLog + 'static,
{
    if let Err(error) = api.sessions.authorize_headers(&headers) {
        return auth_failure(error);
    }

    match api.feed.delete(ActivityId(activity_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => feed_failure(error),
    }
}

fn feed_failure(error: ActivityFeedError) -> Response {
    let status = match &error {
        ActivityFeedError::MissingTitle => StatusCode::UNPROCESSABLE_ENTITY,
        ActivityFeedError::Log(ActivityLogError::NotFound) => StatusCode::NOT_FOUND,
        ActivityFeedError::Log(ActivityLogError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
