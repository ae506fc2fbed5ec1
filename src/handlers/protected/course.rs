// handlers/protected/course.rs - course create/list/update handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde_json::{json, Value};

use crate::api::{CoursePatch, NewCourse};
use crate::auth::Identity;
use crate::database::CourseSummary;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /create - instructor only
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(body) = body?;
    let course = NewCourse::from_json(&body)?;

    let instructor_id = identity
        .user_id()
        .ok_or_else(|| ApiError::bad_request("Invalid user id in token"))?;

    let id = state.courses.create(&course, instructor_id).await?;

    Ok(ApiResponse::created(json!({
        "message": "Course created successfully!",
        "id": id,
    })))
}

/// GET /list - every course as {id, name, description}
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CourseSummary>> {
    Ok(ApiResponse::success(state.courses.list().await?))
}

/// PUT /update/:id - instructor only, partial update
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(id) = id?;
    let Json(body) = body?;
    let patch = CoursePatch::from_json(&body)?;

    state.courses.update(id, &patch).await?;

    Ok(ApiResponse::success(json!({
        "message": "Course updated successfully!",
    })))
}
