//! HTTP surface of the gateway.

mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::gateway::RecipeProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn RecipeProvider>,
}

impl AppState {
    pub fn new(provider: impl RecipeProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/recipes/search", get(routes::search))
        .route("/api/recipes/:id", get(routes::recipe_details))
        .route("/api/grocery-list", post(routes::grocery_list))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
