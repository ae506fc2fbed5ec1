// handlers/protected/analytics.rs - GET /analytics/* handlers
//
// Every query runs on the replica binding and returns a flat array.

use axum::extract::{rejection::PathRejection, Path, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{
    AssignmentCountRow, AverageGradeRow, CourseDetailRow, StudentCountRow, StudentRow,
};
use crate::state::AppState;

/// GET /analytics/course-details/:course_id
pub async fn course_details(
    State(state): State<AppState>,
    course_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<CourseDetailRow>> {
    let Path(course_id) = course_id?;
    Ok(ApiResponse::success(state.analytics.course_details(course_id).await?))
}

/// GET /analytics/average-grades/:course_id
pub async fn average_grades(
    State(state): State<AppState>,
    course_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<AverageGradeRow>> {
    let Path(course_id) = course_id?;
    Ok(ApiResponse::success(state.analytics.average_grades(course_id).await?))
}

/// GET /analytics/courses-student-count
pub async fn courses_student_count(State(state): State<AppState>) -> ApiResult<Vec<StudentCountRow>> {
    Ok(ApiResponse::success(state.analytics.courses_with_student_count().await?))
}

/// GET /analytics/students-no-grades/:course_id
pub async fn students_no_grades(
    State(state): State<AppState>,
    course_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<StudentRow>> {
    let Path(course_id) = course_id?;
    Ok(ApiResponse::success(state.analytics.students_without_grades(course_id).await?))
}

/// GET /analytics/courses-highest-assignments
pub async fn courses_highest_assignments(
    State(state): State<AppState>,
) -> ApiResult<Vec<AssignmentCountRow>> {
    Ok(ApiResponse::success(state.analytics.courses_by_assignment_count().await?))
}
