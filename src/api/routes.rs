use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::store::traits::RecordStore;

pub fn create_router<S: RecordStore + 'static>() -> Router<Arc<S>> {
    // Wildcard CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Collection
        .route("/api/pokemons", get(handlers::list_pokemons::<S>))
        .route("/api/pokemons", post(handlers::create_pokemon::<S>))
        .route("/api/pokemons", delete(handlers::delete_pokemon::<S>))
        // Single records
        .route("/api/onepokemon", get(handlers::find_pokemon_by_query::<S>))
        .route("/api/pokemons/:id", get(handlers::find_pokemon_by_path::<S>))
        .route("/api/pokemons/:id", put(handlers::update_pokemon::<S>))
        // Pagination
        .route(
            "/api/pokemons/page/:page",
            get(handlers::paginate_pokemons::<S>),
        )
        .route(
            "/api/pageoffset/pokemons",
            get(handlers::paginate_by_offset::<S>),
        )
        // Nested locations
        .route(
            "/api/pokemons/:id/locations/:location_id",
            get(handlers::find_pokemon_location::<S>),
        )
        .layer(cors)
}
