//! Maps operation outcomes onto the typed RPC responses.

use crate::model::{
    BulkCreateCargoTypeResponse, BulkCreateManifestResponse, CreateCargoTypeResponse,
    CreateManifestResponse, CreatePlanetResponse, CreateSectorResponse, CreateStarShipResponse,
    FieldErrors, Id, ResponseMessage, StatusResponse,
};

pub trait RpcResponse: Sized {
    type Payload;

    fn build(message: ResponseMessage, payload: Option<Self::Payload>) -> Self;

    fn success(payload: Self::Payload) -> Self {
        Self::build(ResponseMessage::success(), Some(payload))
    }

    fn validation_error(errors: FieldErrors) -> Self {
        Self::build(ResponseMessage::validation_error(errors), None)
    }

    fn failure(message: ResponseMessage) -> Self {
        Self::build(message, None)
    }
}

/// Success with the row's payload when the store produced a row, otherwise
/// the supplied failure message.
pub fn map_row<R, T>(
    row: Option<T>,
    payload: impl FnOnce(T) -> R::Payload,
    on_empty: impl FnOnce() -> ResponseMessage,
) -> R
where
    R: RpcResponse,
{
    match row {
        Some(row) => R::success(payload(row)),
        None => R::failure(on_empty()),
    }
}

/// Success with the rows' payload when the store produced any rows, otherwise
/// the supplied failure message.
pub fn map_rows<R, T>(
    rows: Vec<T>,
    payload: impl FnMut(T) -> Id,
    on_empty: impl FnOnce() -> ResponseMessage,
) -> R
where
    R: RpcResponse<Payload = Vec<Id>>,
{
    if rows.is_empty() {
        R::failure(on_empty())
    } else {
        R::success(rows.into_iter().map(payload).collect())
    }
}

impl RpcResponse for CreateSectorResponse {
    type Payload = Id;

    fn build(message: ResponseMessage, sector_id: Option<Id>) -> Self {
        Self { message, sector_id }
    }
}

impl RpcResponse for CreatePlanetResponse {
    type Payload = Id;

    fn build(message: ResponseMessage, planet_id: Option<Id>) -> Self {
        Self { message, planet_id }
    }
}

impl RpcResponse for CreateCargoTypeResponse {
    type Payload = Id;

    fn build(message: ResponseMessage, cargo_type_id: Option<Id>) -> Self {
        Self {
            message,
            cargo_type_id,
        }
    }
}

impl RpcResponse for BulkCreateCargoTypeResponse {
    type Payload = Vec<Id>;

    fn build(message: ResponseMessage, cargo_type_ids: Option<Vec<Id>>) -> Self {
        Self {
            message,
            cargo_type_ids: cargo_type_ids.unwrap_or_default(),
        }
    }
}

impl RpcResponse for CreateStarShipResponse {
    type Payload = Id;

    fn build(message: ResponseMessage, starship_id: Option<Id>) -> Self {
        Self {
            message,
            starship_id,
        }
    }
}

impl RpcResponse for CreateManifestResponse {
    type Payload = Id;

    fn build(message: ResponseMessage, manifest_id: Option<Id>) -> Self {
        Self {
            message,
            manifest_id,
        }
    }
}

impl RpcResponse for BulkCreateManifestResponse {
    type Payload = Vec<Id>;

    fn build(message: ResponseMessage, manifest_ids: Option<Vec<Id>>) -> Self {
        Self {
            message,
            manifest_ids: manifest_ids.unwrap_or_default(),
        }
    }
}

impl RpcResponse for StatusResponse {
    type Payload = ();

    fn build(message: ResponseMessage, _payload: Option<()>) -> Self {
        Self { message }
    }
}
