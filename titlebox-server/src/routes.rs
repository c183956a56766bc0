use axum::{Router, routing::get};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/search", get(handlers::search_titles))
        .route("/titles", get(handlers::list_titles))
        .route("/titles/{id}", get(handlers::get_title))
        .route("/titles/{id}/{picture}", get(handlers::get_title_picture));

    Router::new()
        .nest(API_PREFIX, api)
        .route_service("/", ServeFile::new(state.static_dir.join("index.html")))
        .route_service("/api/openapi.json", ServeFile::new(&state.openapi_file))
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .with_state(state)
}
