//! # Snowflake Node
//!
//! REST service for planning, triaging and drafting Snowflake Method scenes.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod draft;
pub mod state;

pub use config::{ConfigError, NodeConfig};
pub use draft::{ProseDrafter, TemplateDrafter};
pub use state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))

        // Scene workflow
        .route("/scene/plan", post(api::scene::plan_scene))
        .route("/scene/triage", post(api::scene::triage_scene))
        .route("/scene/draft", post(api::scene::draft_scene))
        .route(
            "/scene/:id",
            get(api::scene::get_scene).delete(api::scene::delete_scene),
        )
        .route("/scene/:id/history", get(api::scene::scene_history))
        .route("/scenes", get(api::scene::list_scenes))

        // Chains
        .route("/chain/validate", post(api::chain::validate_chain))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
