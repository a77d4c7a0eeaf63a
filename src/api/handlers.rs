use axum::{extract::State, http::StatusCode, response::Json, Json as RequestJson};
use serde::Serialize;
use std::sync::Arc;

use crate::logic::{PlanetAdmin, PlanetUser};
use crate::model::{
    BulkCreateCargoTypeRequest, BulkCreateCargoTypeResponse, BulkCreateManifestRequest,
    BulkCreateManifestResponse, CreateCargoTypeRequest, CreateCargoTypeResponse,
    CreateManifestRequest, CreateManifestResponse, CreatePlanetRequest, CreatePlanetResponse,
    CreateSectorRequest, CreateSectorResponse, CreateStarShipRequest, CreateStarShipResponse,
    DeleteCargoTypeRequest, DeleteResponse, DeleteStarShipRequest, MoveStarShipRequest,
    MoveStarShipResponse,
};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Typed responses travel as 200; only unexpected faults leave the typed envelope.
pub type RpcResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

fn internal_error(err: anyhow::Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&format!("{:#}", err))),
    )
}

// Admin handlers
pub async fn create_sector<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<CreateSectorRequest>,
) -> RpcResult<CreateSectorResponse> {
    PlanetAdmin::create_sector(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn get_or_create_sector<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<CreateSectorRequest>,
) -> RpcResult<CreateSectorResponse> {
    PlanetAdmin::get_or_create_sector(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_planet<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<CreatePlanetRequest>,
) -> RpcResult<CreatePlanetResponse> {
    PlanetAdmin::create_planet(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_cargo_type<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<CreateCargoTypeRequest>,
) -> RpcResult<CreateCargoTypeResponse> {
    PlanetAdmin::create_cargo_type(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn bulk_create_cargo_type<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<BulkCreateCargoTypeRequest>,
) -> RpcResult<BulkCreateCargoTypeResponse> {
    PlanetAdmin::bulk_create_cargo_type(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn delete_cargo_type<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<DeleteCargoTypeRequest>,
) -> RpcResult<DeleteResponse> {
    PlanetAdmin::delete_cargo_type(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_starship<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<CreateStarShipRequest>,
) -> RpcResult<CreateStarShipResponse> {
    PlanetAdmin::create_starship(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn delete_starship<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<DeleteStarShipRequest>,
) -> RpcResult<DeleteResponse> {
    PlanetAdmin::delete_starship(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_manifest<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<CreateManifestRequest>,
) -> RpcResult<CreateManifestResponse> {
    PlanetAdmin::create_manifest(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

pub async fn bulk_create_manifest<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<BulkCreateManifestRequest>,
) -> RpcResult<BulkCreateManifestResponse> {
    PlanetAdmin::bulk_create_manifest(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}

// User handlers
pub async fn move_starship<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<MoveStarShipRequest>,
) -> RpcResult<MoveStarShipResponse> {
    PlanetUser::move_starship(&*store, request)
        .await
        .map(Json)
        .map_err(internal_error)
}
