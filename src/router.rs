use std::sync::Arc;

use api::routers::api;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use web::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api(Arc::clone(&state)).with_state(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
