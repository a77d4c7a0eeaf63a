use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Id;

/// Field name to human readable message, one entry per rejected field.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Success,
    ValidationError,
    NotFound,
    AlreadyExists,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub status_code: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub error_fields: FieldErrors,
}

impl ResponseMessage {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            message: None,
            error_fields: FieldErrors::new(),
        }
    }

    pub fn success() -> Self {
        Self::new(StatusCode::Success)
    }

    pub fn validation_error(error_fields: FieldErrors) -> Self {
        Self {
            error_fields,
            ..Self::new(StatusCode::ValidationError)
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NotFound).with_message(message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(StatusCode::AlreadyExists).with_message(message)
    }

    pub fn internal_error() -> Self {
        Self::new(StatusCode::InternalError)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status_code == StatusCode::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSectorResponse {
    pub message: ResponseMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlanetResponse {
    pub message: ResponseMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCargoTypeResponse {
    pub message: ResponseMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_type_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkCreateCargoTypeResponse {
    pub message: ResponseMessage,
    #[serde(default)]
    pub cargo_type_ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStarShipResponse {
    pub message: ResponseMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starship_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateManifestResponse {
    pub message: ResponseMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkCreateManifestResponse {
    pub message: ResponseMessage,
    #[serde(default)]
    pub manifest_ids: Vec<Id>,
}

/// Response for operations that report a status only (move, delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: ResponseMessage,
}

pub type MoveStarShipResponse = StatusResponse;
pub type DeleteResponse = StatusResponse;
