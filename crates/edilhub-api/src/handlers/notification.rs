//! Notification feed and transition handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use edilhub_service::notification::{FeedCounts, FeedFilter, filter};

use crate::dto::request::{FeedQuery, PublishNotificationRequest, VersionQuery, validated};
use crate::dto::response::{
    ApiResponse, CountResponse, FeedResponse, MarkedResponse, MessageResponse,
    NotificationResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<ApiResponse<FeedResponse>>, ApiError> {
    let selection = match query.filter.as_deref() {
        Some(raw) => raw.parse::<FeedFilter>()?,
        None => FeedFilter::default(),
    };
    let limit = state.feed.resolve_limit(query.limit);
    let view = state.feed.feed(limit).await?;

    let counts = FeedCounts::of(&view.notifications);
    let notifications = filter(&view.notifications, selection)
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok(Json(ApiResponse::ok(FeedResponse {
        filter: selection,
        notifications,
        counts,
        stale: view.stale,
        fetched_at: view.fetched_at,
    })))
}

/// GET /api/notifications/unread-count
///
/// Counted over the default-size feed, not the whole table.
pub async fn unread_count(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count().await?;
    Ok(Json(ApiResponse::ok(CountResponse {
        count: count as u64,
    })))
}

/// POST /api/notifications
pub async fn publish(
    State(state): State<AppState>,
    Json(req): Json<PublishNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NotificationResponse>>), ApiError> {
    let req = validated(req)?;
    let n = state.notification_service.publish(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(n.into()))))
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NotificationResponse>>, ApiError> {
    let n = state.notification_service.get(id).await?;
    Ok(Json(ApiResponse::ok(n.into())))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
) -> Result<Json<ApiResponse<NotificationResponse>>, ApiError> {
    let n = state
        .notification_service
        .mark_as_read(id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(n.into())))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MarkedResponse>>, ApiError> {
    let marked = state.notification_service.mark_all_as_read().await?;
    Ok(Json(ApiResponse::ok(MarkedResponse { marked })))
}

/// PUT /api/notifications/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
) -> Result<Json<ApiResponse<NotificationResponse>>, ApiError> {
    let n = state
        .notification_service
        .archive(id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(n.into())))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .notification_service
        .delete(id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Notification deleted".to_string(),
    })))
}
