//! UI preference handlers.

use axum::Json;
use axum::extract::{Query, State};

use edilhub_entity::preferences::{ThemeSettings, UiPreferences};

use crate::dto::request::{
    AddFavoriteRequest, ProfileRequest, RemoveFavoriteQuery, SidebarRequest, validated,
};
use crate::dto::response::{ApiResponse, ToggleResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/preferences
pub async fn get_preferences(State(state): State<AppState>) -> Json<ApiResponse<UiPreferences>> {
    Json(ApiResponse::ok(state.preferences.snapshot().await))
}

/// PUT /api/preferences/theme
pub async fn set_theme(
    State(state): State<AppState>,
    Json(theme): Json<ThemeSettings>,
) -> Result<Json<ApiResponse<UiPreferences>>, ApiError> {
    state.preferences.set_theme(theme).await?;
    Ok(Json(ApiResponse::ok(state.preferences.snapshot().await)))
}

/// PUT /api/preferences/sidebar
pub async fn update_sidebar(
    State(state): State<AppState>,
    Json(req): Json<SidebarRequest>,
) -> Result<Json<ApiResponse<UiPreferences>>, ApiError> {
    if let Some(visible) = req.visible {
        state.preferences.set_sidebar_visible(visible).await?;
    }
    if let Some(section) = req.toggle_section.as_deref() {
        state.preferences.toggle_section(section).await?;
    }
    Ok(Json(ApiResponse::ok(state.preferences.snapshot().await)))
}

/// POST /api/preferences/sidebar/toggle
pub async fn toggle_sidebar(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ToggleResponse>>, ApiError> {
    let value = state.preferences.toggle_sidebar().await?;
    Ok(Json(ApiResponse::ok(ToggleResponse { value })))
}

/// POST /api/preferences/favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<Json<ApiResponse<ToggleResponse>>, ApiError> {
    let req = validated(req)?;
    let value = state.preferences.add_favorite(&req.path, &req.label).await?;
    Ok(Json(ApiResponse::ok(ToggleResponse { value })))
}

/// DELETE /api/preferences/favorites?path=
pub async fn remove_favorite(
    State(state): State<AppState>,
    Query(query): Query<RemoveFavoriteQuery>,
) -> Result<Json<ApiResponse<ToggleResponse>>, ApiError> {
    let value = state.preferences.remove_favorite(&query.path).await?;
    Ok(Json(ApiResponse::ok(ToggleResponse { value })))
}

/// PUT /api/preferences/profile
pub async fn set_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ApiResponse<UiPreferences>>, ApiError> {
    let req = validated(req)?;
    state.preferences.set_profile(req.into()).await?;
    Ok(Json(ApiResponse::ok(state.preferences.snapshot().await)))
}

/// DELETE /api/preferences/profile
pub async fn clear_profile(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UiPreferences>>, ApiError> {
    state.preferences.clear_profile().await?;
    Ok(Json(ApiResponse::ok(state.preferences.snapshot().await)))
}

/// DELETE /api/preferences
pub async fn reset(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UiPreferences>>, ApiError> {
    state.preferences.reset().await?;
    Ok(Json(ApiResponse::ok(state.preferences.snapshot().await)))
}
