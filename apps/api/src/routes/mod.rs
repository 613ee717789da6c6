pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::selection::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/departments",
            get(handlers::handle_list_departments),
        )
        .route(
            "/api/v1/departments/:department/sheets",
            get(handlers::handle_department_sheets),
        )
        .route(
            "/api/v1/interviewers/sheets",
            get(handlers::handle_interviewer_sheets),
        )
        .route(
            "/api/v1/candidates/table",
            post(handlers::handle_candidate_table),
        )
        .route(
            "/api/v1/candidates/rank",
            post(handlers::handle_candidate_rank),
        )
        .route(
            "/api/v1/interviewers/table",
            post(handlers::handle_interviewer_table),
        )
        .route(
            "/api/v1/interviewers/rank",
            post(handlers::handle_interviewer_rank),
        )
        .with_state(state)
}
