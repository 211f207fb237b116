pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analyses",
            post(analysis::handle_create_analysis)
                .get(history::handle_list_analyses)
                .delete(history::handle_clear_history),
        )
        .route(
            "/api/v1/analyses/preview",
            post(analysis::handle_preview_analysis),
        )
        .route(
            "/api/v1/analyses/latest",
            get(history::handle_latest_analysis),
        )
        .route(
            "/api/v1/analyses/:id",
            get(history::handle_get_analysis).delete(history::handle_delete_analysis),
        )
        .route(
            "/api/v1/analyses/:id/skills",
            patch(history::handle_update_skill_confidence),
        )
        .with_state(state)
}
