use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Id, Reference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sector {
    pub sector_id: Id,
    pub name: String,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CargoType {
    pub cargo_type_id: Id,
    pub name: String,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Planet {
    pub planet_id: Id,
    pub name: String,
    pub sector_id: Id,
    /// Cargo type that is globally scarce on this planet, if any
    pub scarce_cargo_type_id: Option<Id>,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StarShip {
    pub starship_id: Id,
    pub name: String,
    pub model: String,
    /// The planet the ship currently sits at; the only column updated after creation
    pub planet_id: Id,
    pub date_created: DateTime<Utc>,
}

/// Quantity of one cargo type carried by one starship.
///
/// The `(starship_id, cargo_type_id)` pair is unique and the row is removed
/// together with either owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Manifest {
    pub manifest_id: Id,
    pub starship_id: Id,
    pub cargo_type_id: Id,
    pub quantity: i64,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlanet {
    pub name: String,
    pub sector: Reference,
    pub scarce_cargo: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStarShip {
    pub name: String,
    pub model: String,
    pub planet_id: Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewManifest {
    pub starship_id: Id,
    pub cargo_type_id: Id,
    pub quantity: i64,
}

impl NewManifest {
    pub fn new(starship_id: Id, cargo_type_id: Id, quantity: i64) -> Self {
        Self {
            starship_id,
            cargo_type_id,
            quantity,
        }
    }

    pub fn key(&self) -> (Id, Id) {
        (self.starship_id, self.cargo_type_id)
    }
}
