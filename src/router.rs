//! Route table for the todo API.

use crate::handlers::{health, todos};
use crate::repository::TodoRepository;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router over the given state.
///
/// Static segments (`today`, `tomorrow`, `week`) and the `:id` capture
/// coexist; the router prefers the static match.
pub fn router<R: TodoRepository>(state: AppState<R>) -> Router {
    Router::new()
        .route("/api/todo", get(todos::list_all::<R>).post(todos::create::<R>))
        .route("/api/todo/today", get(todos::list_today::<R>))
        .route("/api/todo/tomorrow", get(todos::list_tomorrow::<R>))
        .route("/api/todo/week", get(todos::list_week::<R>))
        .route(
            "/api/todo/:id",
            get(todos::get_by_id::<R>)
                .put(todos::update::<R>)
                .delete(todos::delete_todo::<R>),
        )
        .route("/api/todo/:id/percent", patch(todos::update_percent::<R>))
        .route("/api/todo/:id/done", patch(todos::mark_done::<R>))
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
