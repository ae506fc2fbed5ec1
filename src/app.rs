use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::{jwt_auth_middleware, require_role, INSTRUCTOR};
use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(public::health))
        // Protected API
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/test-token", get(protected::test_token))
        .merge(course_routes())
        .nest("/analytics", analytics_routes())
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn course_routes() -> Router<AppState> {
    use protected::course;

    Router::new()
        .route(
            "/create",
            post(course::create).route_layer(from_fn_with_state(INSTRUCTOR, require_role)),
        )
        .route("/list", get(course::list))
        .route(
            "/update/:id",
            put(course::update).route_layer(from_fn_with_state(INSTRUCTOR, require_role)),
        )
}

fn analytics_routes() -> Router<AppState> {
    use protected::analytics;

    Router::new()
        .route("/course-details/:course_id", get(analytics::course_details))
        .route("/average-grades/:course_id", get(analytics::average_grades))
        .route("/courses-student-count", get(analytics::courses_student_count))
        .route("/students-no-grades/:course_id", get(analytics::students_no_grades))
        .route(
            "/courses-highest-assignments",
            get(analytics::courses_highest_assignments),
        )
}
