use crate::model::{
    CargoType, Id, Manifest, NewManifest, NewPlanet, NewStarShip, Planet, Sector, StarShip,
};
use crate::store::error::StoreResult;

// Every method is one unit of work: it commits on success and leaves no trace
// on any error path.

#[async_trait::async_trait]
pub trait SectorStore: Send + Sync {
    /// Insert the sector, or return the existing row with the same name.
    async fn upsert_sector(&self, name: &str) -> StoreResult<Sector>;
}

#[async_trait::async_trait]
pub trait CargoTypeStore: Send + Sync {
    /// Insert the cargo type, or return the existing row with the same name.
    async fn upsert_cargo_type(&self, name: &str) -> StoreResult<CargoType>;
    /// Insert all names in one statement, skipping names that already exist.
    /// Only the newly inserted rows are returned.
    async fn insert_cargo_types(&self, names: &[String]) -> StoreResult<Vec<CargoType>>;
    /// Delete a cargo type together with its manifests.
    async fn delete_cargo_type(&self, cargo_type_id: Id) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait PlanetStore: Send + Sync {
    /// Insert a planet whose sector resolves from the reference. `None` when
    /// the sector does not resolve. An unresolved scarce cargo is stored as NULL.
    async fn insert_planet(&self, planet: &NewPlanet) -> StoreResult<Option<Planet>>;
}

#[async_trait::async_trait]
pub trait StarShipStore: Send + Sync {
    /// Insert a starship at an existing planet. `None` when the planet does not exist.
    async fn insert_starship(&self, starship: &NewStarShip) -> StoreResult<Option<StarShip>>;
    /// Point the starship at another planet. `None` when the starship does not
    /// exist; the row is returned untouched when it already sits at `planet_id`.
    async fn move_starship(&self, starship_id: Id, planet_id: Id) -> StoreResult<Option<StarShip>>;
    /// Delete a starship together with its manifests.
    async fn delete_starship(&self, starship_id: Id) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait ManifestStore: Send + Sync {
    /// Insert the manifest, or add its quantity to the existing row for the
    /// same (starship, cargo type) pair. `None` when either reference is missing.
    async fn upsert_manifest(&self, manifest: &NewManifest) -> StoreResult<Option<Manifest>>;
    /// Multi-row variant of `upsert_manifest` executed as one statement. The
    /// pairs must be distinct. A referential violation anywhere rolls back the
    /// whole batch and yields an empty list.
    async fn upsert_manifests(&self, manifests: &[NewManifest]) -> StoreResult<Vec<Manifest>>;
}

pub trait Store:
    SectorStore + CargoTypeStore + PlanetStore + StarShipStore + ManifestStore + Send + Sync
{
}
