//! Request payloads for the admin and user RPCs.
//!
//! Every field is defaulted on deserialization, so an absent field arrives as
//! its zero value and is reported by validation instead of failing to parse.

use serde::{Deserialize, Serialize};

use crate::model::{Id, NewManifest, Reference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSectorRequest {
    pub sector_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePlanetRequest {
    pub planet_name: String,
    /// Sector the planet belongs to, by id or by name
    pub sector: Option<Reference>,
    /// Optional scarce cargo type; an unresolved reference is stored as NULL
    pub scarce_cargo: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateCargoTypeRequest {
    pub cargo_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkCreateCargoTypeRequest {
    pub cargo_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateStarShipRequest {
    pub starship_name: String,
    pub starship_model: String,
    pub planet_id: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateManifestRequest {
    pub starship_id: Id,
    pub cargo_type_id: Id,
    pub quantity: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestEntry {
    pub starship_id: Id,
    pub cargo_type_id: Id,
    pub quantity: i64,
}

impl From<ManifestEntry> for NewManifest {
    fn from(entry: ManifestEntry) -> Self {
        NewManifest::new(entry.starship_id, entry.cargo_type_id, entry.quantity)
    }
}

impl From<&CreateManifestRequest> for NewManifest {
    fn from(request: &CreateManifestRequest) -> Self {
        NewManifest::new(request.starship_id, request.cargo_type_id, request.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkCreateManifestRequest {
    pub manifests: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveStarShipRequest {
    pub starship_id: Id,
    pub planet_id: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteCargoTypeRequest {
    pub cargo_type_id: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteStarShipRequest {
    pub starship_id: Id,
}
