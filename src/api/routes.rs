use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Admin: sectors and planets
        .route("/admin/sectors", post(handlers::create_sector::<S>))
        .route(
            "/admin/sectors/get-or-create",
            post(handlers::get_or_create_sector::<S>),
        )
        .route("/admin/planets", post(handlers::create_planet::<S>))
        // Admin: cargo types
        .route("/admin/cargo-types", post(handlers::create_cargo_type::<S>))
        .route(
            "/admin/cargo-types/bulk",
            post(handlers::bulk_create_cargo_type::<S>),
        )
        .route(
            "/admin/cargo-types/delete",
            post(handlers::delete_cargo_type::<S>),
        )
        // Admin: starships and manifests
        .route("/admin/starships", post(handlers::create_starship::<S>))
        .route(
            "/admin/starships/delete",
            post(handlers::delete_starship::<S>),
        )
        .route("/admin/manifests", post(handlers::create_manifest::<S>))
        .route(
            "/admin/manifests/bulk",
            post(handlers::bulk_create_manifest::<S>),
        )
        // User operations
        .route("/user/starships/move", post(handlers::move_starship::<S>))
}

/// Router with its store attached, ready to serve.
pub fn app<S: Store + 'static>(store: Arc<S>) -> Router {
    create_router().with_state(store)
}
