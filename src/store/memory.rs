use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;

use crate::model::{
    CargoType, Id, Manifest, NewManifest, NewPlanet, NewStarShip, Planet, Reference, Sector,
    StarShip,
};
use crate::store::error::{constraints, StoreError, StoreResult};
use crate::store::traits::{
    CargoTypeStore, ManifestStore, PlanetStore, SectorStore, StarShipStore, Store,
};

/// Row storage plus id sequences. Cloned wholesale to stage a unit of work.
#[derive(Debug, Clone, Default)]
struct Tables {
    sectors: BTreeMap<Id, Sector>,
    cargo_types: BTreeMap<Id, CargoType>,
    planets: BTreeMap<Id, Planet>,
    starships: BTreeMap<Id, StarShip>,
    manifests: BTreeMap<Id, Manifest>,
    last_id: Id,
}

impl Tables {
    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        self.last_id
    }

    fn resolve_sector(&self, reference: &Reference) -> Option<Id> {
        self.sectors
            .values()
            .find(|s| reference.matches(s.sector_id, &s.name))
            .map(|s| s.sector_id)
    }

    fn resolve_cargo_type(&self, reference: &Reference) -> Option<Id> {
        self.cargo_types
            .values()
            .find(|c| reference.matches(c.cargo_type_id, &c.name))
            .map(|c| c.cargo_type_id)
    }

    fn manifest_for(&self, starship_id: Id, cargo_type_id: Id) -> Option<Id> {
        self.manifests
            .values()
            .find(|m| m.starship_id == starship_id && m.cargo_type_id == cargo_type_id)
            .map(|m| m.manifest_id)
    }

    /// Same semantics as the SQL upsert: insert, or add to the existing quantity.
    fn apply_manifest(&mut self, manifest: &NewManifest) -> StoreResult<Manifest> {
        if !self.starships.contains_key(&manifest.starship_id) {
            return Err(StoreError::foreign_key(constraints::FK_MANIFEST_STARSHIP));
        }
        if !self.cargo_types.contains_key(&manifest.cargo_type_id) {
            return Err(StoreError::foreign_key(constraints::FK_MANIFEST_CARGO_TYPE));
        }

        let existing = self.manifests.values_mut().find(|m| {
            m.starship_id == manifest.starship_id && m.cargo_type_id == manifest.cargo_type_id
        });
        if let Some(row) = existing {
            let quantity = row
                .quantity
                .checked_add(manifest.quantity)
                .ok_or(StoreError::ValueOutOfRange)?;
            if quantity < 0 {
                return Err(StoreError::check(constraints::CK_MANIFEST_QUANTITY_NON_NEGATIVE));
            }
            row.quantity = quantity;
            return Ok(row.clone());
        }

        if manifest.quantity < 0 {
            return Err(StoreError::check(constraints::CK_MANIFEST_QUANTITY_NON_NEGATIVE));
        }
        let row = Manifest {
            manifest_id: self.next_id(),
            starship_id: manifest.starship_id,
            cargo_type_id: manifest.cargo_type_id,
            quantity: manifest.quantity,
            date_created: Utc::now(),
        };
        self.manifests.insert(row.manifest_id, row.clone());
        Ok(row)
    }
}

/// Store that keeps every table in process memory.
///
/// Enforces the same unique, foreign key, check and cascade rules as the
/// Postgres schema. Each operation stages its writes on a copy of the tables
/// and swaps the copy in only when the operation succeeds.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn transaction<T>(&self, work: impl FnOnce(&mut Tables) -> StoreResult<T>) -> StoreResult<T> {
        let mut tables = self.tables.lock();
        let mut staged = tables.clone();
        let result = work(&mut staged)?;
        *tables = staged;
        Ok(result)
    }

    pub fn sector_count(&self) -> usize {
        self.tables.lock().sectors.len()
    }

    pub fn cargo_type_count(&self) -> usize {
        self.tables.lock().cargo_types.len()
    }

    pub fn planet_count(&self) -> usize {
        self.tables.lock().planets.len()
    }

    pub fn starship_count(&self) -> usize {
        self.tables.lock().starships.len()
    }

    pub fn manifest_count(&self) -> usize {
        self.tables.lock().manifests.len()
    }

    pub fn planet(&self, planet_id: Id) -> Option<Planet> {
        self.tables.lock().planets.get(&planet_id).cloned()
    }

    pub fn starship(&self, starship_id: Id) -> Option<StarShip> {
        self.tables.lock().starships.get(&starship_id).cloned()
    }

    pub fn manifest(&self, starship_id: Id, cargo_type_id: Id) -> Option<Manifest> {
        let tables = self.tables.lock();
        tables
            .manifest_for(starship_id, cargo_type_id)
            .and_then(|id| tables.manifests.get(&id).cloned())
    }
}

#[async_trait::async_trait]
impl SectorStore for InMemoryStore {
    async fn upsert_sector(&self, name: &str) -> StoreResult<Sector> {
        self.transaction(|tables| {
            if let Some(existing) = tables.sectors.values().find(|s| s.name == name) {
                return Ok(existing.clone());
            }
            let sector = Sector {
                sector_id: tables.next_id(),
                name: name.to_string(),
                date_created: Utc::now(),
            };
            tables.sectors.insert(sector.sector_id, sector.clone());
            Ok(sector)
        })
    }
}

#[async_trait::async_trait]
impl CargoTypeStore for InMemoryStore {
    async fn upsert_cargo_type(&self, name: &str) -> StoreResult<CargoType> {
        self.transaction(|tables| {
            if let Some(existing) = tables.cargo_types.values().find(|c| c.name == name) {
                return Ok(existing.clone());
            }
            let cargo_type = CargoType {
                cargo_type_id: tables.next_id(),
                name: name.to_string(),
                date_created: Utc::now(),
            };
            tables
                .cargo_types
                .insert(cargo_type.cargo_type_id, cargo_type.clone());
            Ok(cargo_type)
        })
    }

    async fn insert_cargo_types(&self, names: &[String]) -> StoreResult<Vec<CargoType>> {
        self.transaction(|tables| {
            let mut inserted = Vec::new();
            for name in names {
                if tables.cargo_types.values().any(|c| &c.name == name) {
                    continue;
                }
                let cargo_type = CargoType {
                    cargo_type_id: tables.next_id(),
                    name: name.clone(),
                    date_created: Utc::now(),
                };
                tables
                    .cargo_types
                    .insert(cargo_type.cargo_type_id, cargo_type.clone());
                inserted.push(cargo_type);
            }
            Ok(inserted)
        })
    }

    async fn delete_cargo_type(&self, cargo_type_id: Id) -> StoreResult<bool> {
        self.transaction(|tables| {
            if tables.cargo_types.remove(&cargo_type_id).is_none() {
                return Ok(false);
            }
            tables
                .manifests
                .retain(|_, m| m.cargo_type_id != cargo_type_id);
            for planet in tables.planets.values_mut() {
                if planet.scarce_cargo_type_id == Some(cargo_type_id) {
                    planet.scarce_cargo_type_id = None;
                }
            }
            Ok(true)
        })
    }
}

#[async_trait::async_trait]
impl PlanetStore for InMemoryStore {
    async fn insert_planet(&self, planet: &NewPlanet) -> StoreResult<Option<Planet>> {
        self.transaction(|tables| {
            let Some(sector_id) = tables.resolve_sector(&planet.sector) else {
                return Ok(None);
            };
            if tables.planets.values().any(|p| p.name == planet.name) {
                return Err(StoreError::unique(constraints::UQ_PLANET_NAME));
            }
            let scarce_cargo_type_id = planet
                .scarce_cargo
                .as_ref()
                .and_then(|reference| tables.resolve_cargo_type(reference));

            let row = Planet {
                planet_id: tables.next_id(),
                name: planet.name.clone(),
                sector_id,
                scarce_cargo_type_id,
                date_created: Utc::now(),
            };
            tables.planets.insert(row.planet_id, row.clone());
            Ok(Some(row))
        })
    }
}

#[async_trait::async_trait]
impl StarShipStore for InMemoryStore {
    async fn insert_starship(&self, starship: &NewStarShip) -> StoreResult<Option<StarShip>> {
        self.transaction(|tables| {
            if !tables.planets.contains_key(&starship.planet_id) {
                return Ok(None);
            }
            let row = StarShip {
                starship_id: tables.next_id(),
                name: starship.name.clone(),
                model: starship.model.clone(),
                planet_id: starship.planet_id,
                date_created: Utc::now(),
            };
            tables.starships.insert(row.starship_id, row.clone());
            Ok(Some(row))
        })
    }

    async fn move_starship(&self, starship_id: Id, planet_id: Id) -> StoreResult<Option<StarShip>> {
        self.transaction(|tables| {
            let planet_exists = tables.planets.contains_key(&planet_id);
            let Some(starship) = tables.starships.get_mut(&starship_id) else {
                return Ok(None);
            };
            if starship.planet_id == planet_id {
                return Ok(Some(starship.clone()));
            }
            if !planet_exists {
                return Err(StoreError::foreign_key(constraints::FK_STARSHIP_PLANET));
            }
            starship.planet_id = planet_id;
            Ok(Some(starship.clone()))
        })
    }

    async fn delete_starship(&self, starship_id: Id) -> StoreResult<bool> {
        self.transaction(|tables| {
            if tables.starships.remove(&starship_id).is_none() {
                return Ok(false);
            }
            tables.manifests.retain(|_, m| m.starship_id != starship_id);
            Ok(true)
        })
    }
}

#[async_trait::async_trait]
impl ManifestStore for InMemoryStore {
    async fn upsert_manifest(&self, manifest: &NewManifest) -> StoreResult<Option<Manifest>> {
        self.transaction(|tables| match tables.apply_manifest(manifest) {
            Ok(row) => Ok(Some(row)),
            Err(err) if err.is_foreign_key_violation() => Ok(None),
            Err(err) => Err(err),
        })
    }

    async fn upsert_manifests(&self, manifests: &[NewManifest]) -> StoreResult<Vec<Manifest>> {
        let result = self.transaction(|tables| {
            manifests
                .iter()
                .map(|manifest| tables.apply_manifest(manifest))
                .collect::<StoreResult<Vec<_>>>()
        });

        match result {
            Err(err) if err.is_foreign_key_violation() => Ok(Vec::new()),
            other => other,
        }
    }
}

impl Store for InMemoryStore {}
