pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::recommend::handlers::handle_recommend;
use crate::state::AppState;
use crate::summarize::handlers::handle_summarize;
use crate::tracker::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Skills
        .route(
            "/skills",
            get(handlers::handle_list_skills).post(handlers::handle_create_skill),
        )
        .route(
            "/skills/",
            get(handlers::handle_list_skills).post(handlers::handle_create_skill),
        )
        .route("/skills/stats", get(handlers::handle_skill_stats))
        .route(
            "/skills/:id",
            get(handlers::handle_get_skill)
                .patch(handlers::handle_update_skill)
                .delete(handlers::handle_delete_skill),
        )
        // Events
        .route(
            "/events",
            get(handlers::handle_list_events).post(handlers::handle_create_event),
        )
        .route(
            "/events/",
            get(handlers::handle_list_events).post(handlers::handle_create_event),
        )
        .route("/events/activity", get(handlers::handle_event_activity))
        .route("/events/:id", delete(handlers::handle_delete_event))
        // AI helpers
        .route("/ai/recommend", get(handle_recommend))
        .route("/ai/recommend/", get(handle_recommend))
        .route("/ai/summarize", post(handle_summarize))
        .route("/ai/summarize/", post(handle_summarize))
        .with_state(state)
}
