use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Activity, NewActivityRequest, ProgressUpdateRequest, UpdateActivityRequest};
use crate::state::AppState;
use crate::views::{DashboardStats, MonthView, SortMode};

#[derive(Deserialize)]
struct ListQueryParams {
    search: Option<String>,
    category: Option<String>,
    sort: Option<SortMode>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/{id}",
            get(get_activity).patch(update_activity).delete(delete_activity),
        )
        .route("/activities/{id}/progress", patch(update_progress))
        .route("/activities/{id}/like", post(like_activity))
        .route("/categories", get(list_categories))
        .route("/stats", get(dashboard_stats))
        .route("/calendar/{year}/{month}", get(month_calendar))
        .route("/calendar/day/{date}", get(day_activities))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Query params, when present, update the transient filter state before the
/// list is computed; callers re-fetch this after every mutation.
async fn list_activities(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let mut tracker = state.tracker()?;

    if let Some(search) = params.search {
        tracker.set_search(search);
    }
    if let Some(category) = params.category {
        tracker.set_category(&category);
    }
    if let Some(sort) = params.sort {
        tracker.set_sort(sort);
    }

    Ok(Json(tracker.list_filtered()))
}

async fn create_activity(
    State(state): State<AppState>,
    Json(req): Json<NewActivityRequest>,
) -> Result<Json<Activity>, AppError> {
    let activity = state.tracker()?.create(req)?;
    Ok(Json(activity))
}

async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Activity>, AppError> {
    let tracker = state.tracker()?;
    let activity = tracker.get(id).cloned().ok_or(AppError::NotFound)?;
    Ok(Json(activity))
}

// Mutations on an id that is no longer present are silent no-ops, so these
// answer 204 either way and callers re-fetch the views they need.

async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateActivityRequest>,
) -> Result<StatusCode, AppError> {
    state.tracker()?.update(id, req)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.tracker()?.delete(id);
    Ok(StatusCode::NO_CONTENT)
}

async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<ProgressUpdateRequest>,
) -> Result<StatusCode, AppError> {
    state.tracker()?.update_progress(id, req)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn like_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.tracker()?.like(id);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let tracker = state.tracker()?;
    Ok(Json(tracker.categories().to_vec()))
}

async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let tracker = state.tracker()?;
    Ok(Json(tracker.stats()))
}

async fn month_calendar(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthView>, AppError> {
    let tracker = state.tracker()?;
    let view = tracker
        .month_view(year, month)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {year}-{month}")))?;
    Ok(Json(view))
}

async fn day_activities(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let tracker = state.tracker()?;
    Ok(Json(tracker.activities_on(&date)))
}
