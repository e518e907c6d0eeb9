use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
        .route("/api/users", get(handlers::list_users).post(handlers::add_user))
        .route("/api/users/stats", get(handlers::user_stats))
        .route("/api/users/export", get(handlers::export_users))
        .route("/api/users/import", post(handlers::import_users))
        .route("/api/users/:id", delete(handlers::remove_user))
        .route("/api/users/:id/toggle", post(handlers::toggle_user))
        .route("/api/users/:id/weight", put(handlers::update_weight))
        .route("/api/users/:id/name", put(handlers::update_name))
        .route("/api/users/:id/reset-stats", post(handlers::reset_user_stats))
        .route("/api/users/:id/history", get(handlers::user_history))
        .route("/api/wheel", get(handlers::get_wheel))
        .route("/api/spin", post(handlers::spin))
        .route(
            "/api/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .route("/api/history/recent", get(handlers::recent_history))
        .route("/api/history/export", get(handlers::export_history))
        .route("/api/history/import", post(handlers::import_history))
        .route("/api/analytics", get(handlers::get_analytics))
        .route("/api/reset", post(handlers::reset_all))
        .with_state(state)
}
