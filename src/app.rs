use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/followups", post(handlers::form_create))
        .route("/followups/:id/complete", post(handlers::form_complete))
        .route("/followups/:id/delete", post(handlers::form_delete))
        .route("/api/health", get(handlers::health))
        .route(
            "/api/followups",
            get(handlers::list_followups).post(handlers::create_followup),
        )
        .route("/api/followups/stats", get(handlers::get_stats))
        .route(
            "/api/followups/:id",
            put(handlers::update_followup).delete(handlers::delete_followup),
        )
        .route("/api/dashboard", get(handlers::get_dashboard))
        .fallback(handlers::not_found)
        .with_state(state)
}
