use anyhow::{Context, Result};
use log::{debug, info};
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::model::{
    CargoType, Id, Manifest, NewManifest, NewPlanet, NewStarShip, Planet, Reference, Sector,
    StarShip,
};
use crate::store::error::constraints::UQ_MANIFEST_STARSHIP_CARGO;
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{
    CargoTypeStore, ManifestStore, PlanetStore, SectorStore, StarShipStore, Store,
};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const SECTOR_COLUMNS: &str = "sector_id, name, date_created";
const CARGO_TYPE_COLUMNS: &str = "cargo_type_id, name, date_created";
const PLANET_COLUMNS: &str = "planet_id, name, sector_id, scarce_cargo_type_id, date_created";
const STARSHIP_COLUMNS: &str = "starship_id, name, model, planet_id, date_created";
const MANIFEST_COLUMNS: &str = "manifest_id, starship_id, cargo_type_id, quantity, date_created";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL and default pool settings
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect(database_url, &DatabaseConfig::default()).await
    }

    /// Create a new PostgreSQL store with pool settings taken from configuration
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Bring the schema to the latest migration
    pub async fn migrate(&self) -> StoreResult<()> {
        MIGRATOR.run(&self.pool).await?;
        info!("Database schema is up to date");
        Ok(())
    }
}

/// `WHERE` predicate for a reference against a table with `<id_column>` and `name`.
fn reference_predicate(
    reference: &Reference,
    alias: &str,
    id_column: &str,
    placeholder: usize,
) -> String {
    match reference {
        Reference::Id(_) => format!("{}.{} = ${}", alias, id_column, placeholder),
        Reference::Name(_) => format!("{}.name = ${}", alias, placeholder),
    }
}

fn bind_reference<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    reference: &'q Reference,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match reference {
        Reference::Id(id) => query.bind(*id),
        Reference::Name(name) => query.bind(name.as_str()),
    }
}

#[async_trait::async_trait]
impl SectorStore for PostgresStore {
    async fn upsert_sector(&self, name: &str) -> StoreResult<Sector> {
        let mut tx = self.pool.begin().await?;

        // Rewriting the name on conflict makes RETURNING yield the existing row.
        let sector = sqlx::query_as::<_, Sector>(&format!(
            r#"
            INSERT INTO planet.sector (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING {SECTOR_COLUMNS}
            "#
        ))
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(sector)
    }
}

#[async_trait::async_trait]
impl CargoTypeStore for PostgresStore {
    async fn upsert_cargo_type(&self, name: &str) -> StoreResult<CargoType> {
        let mut tx = self.pool.begin().await?;

        let cargo_type = sqlx::query_as::<_, CargoType>(&format!(
            r#"
            INSERT INTO planet.cargo_type (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING {CARGO_TYPE_COLUMNS}
            "#
        ))
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(cargo_type)
    }

    async fn insert_cargo_types(&self, names: &[String]) -> StoreResult<Vec<CargoType>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, CargoType>(&format!(
            r#"
            INSERT INTO planet.cargo_type (name)
            SELECT name FROM UNNEST($1::text[]) AS input(name)
            ON CONFLICT (name) DO NOTHING
            RETURNING {CARGO_TYPE_COLUMNS}
            "#
        ))
        .bind(names)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Inserted {} of {} cargo types", inserted.len(), names.len());
        Ok(inserted)
    }

    async fn delete_cargo_type(&self, cargo_type_id: Id) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM planet.cargo_type WHERE cargo_type_id = $1")
            .bind(cargo_type_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl PlanetStore for PostgresStore {
    async fn insert_planet(&self, planet: &NewPlanet) -> StoreResult<Option<Planet>> {
        let sector_predicate = reference_predicate(&planet.sector, "s", "sector_id", 2);
        let scarce_cargo = match &planet.scarce_cargo {
            Some(reference) => format!(
                "(SELECT c.cargo_type_id FROM planet.cargo_type c WHERE {})",
                reference_predicate(reference, "c", "cargo_type_id", 3)
            ),
            None => "NULL::bigint".to_string(),
        };

        // Selecting from the sector table yields no row when the sector does
        // not resolve, so nothing is inserted. The scarce cargo subquery is
        // scalar and silently yields NULL on a miss.
        let sql = format!(
            r#"
            INSERT INTO planet.planet (name, sector_id, scarce_cargo_type_id)
            SELECT $1, s.sector_id, {scarce_cargo}
            FROM planet.sector s
            WHERE {sector_predicate}
            RETURNING {PLANET_COLUMNS}
            "#
        );

        let mut query = sqlx::query_as::<_, Planet>(&sql).bind(planet.name.as_str());
        query = bind_reference(query, &planet.sector);
        if let Some(reference) = &planet.scarce_cargo {
            query = bind_reference(query, reference);
        }

        let mut tx = self.pool.begin().await?;
        let inserted = query.fetch_optional(&mut *tx).await?;
        tx.commit().await?;

        Ok(inserted)
    }
}

#[async_trait::async_trait]
impl StarShipStore for PostgresStore {
    async fn insert_starship(&self, starship: &NewStarShip) -> StoreResult<Option<StarShip>> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, StarShip>(&format!(
            r#"
            INSERT INTO planet.starship (name, model, planet_id)
            SELECT $1, $2, p.planet_id
            FROM planet.planet p
            WHERE p.planet_id = $3
            RETURNING {STARSHIP_COLUMNS}
            "#
        ))
        .bind(starship.name.as_str())
        .bind(starship.model.as_str())
        .bind(starship.planet_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(inserted)
    }

    async fn move_starship(&self, starship_id: Id, planet_id: Id) -> StoreResult<Option<StarShip>> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, StarShip>(&format!(
            "SELECT {STARSHIP_COLUMNS} FROM planet.starship WHERE starship_id = $1 FOR UPDATE"
        ))
        .bind(starship_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        if current.planet_id == planet_id {
            tx.commit().await?;
            return Ok(Some(current));
        }

        let moved = sqlx::query_as::<_, StarShip>(&format!(
            r#"
            UPDATE planet.starship
            SET planet_id = $2
            WHERE starship_id = $1
            RETURNING {STARSHIP_COLUMNS}
            "#
        ))
        .bind(starship_id)
        .bind(planet_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(moved))
    }

    async fn delete_starship(&self, starship_id: Id) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM planet.starship WHERE starship_id = $1")
            .bind(starship_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl ManifestStore for PostgresStore {
    async fn upsert_manifest(&self, manifest: &NewManifest) -> StoreResult<Option<Manifest>> {
        let mut tx = self.pool.begin().await?;

        // Both existence checks gate the SELECT, so a missing reference
        // produces zero rows instead of a foreign key error.
        let row = sqlx::query_as::<_, Manifest>(&format!(
            r#"
            INSERT INTO planet.manifest AS m (starship_id, cargo_type_id, quantity)
            SELECT $1::bigint, $2::bigint, $3::bigint
            WHERE EXISTS (SELECT 1 FROM planet.starship WHERE starship_id = $1)
              AND EXISTS (SELECT 1 FROM planet.cargo_type WHERE cargo_type_id = $2)
            ON CONFLICT ON CONSTRAINT {UQ_MANIFEST_STARSHIP_CARGO}
            DO UPDATE SET quantity = m.quantity + EXCLUDED.quantity
            RETURNING {MANIFEST_COLUMNS}
            "#
        ))
        .bind(manifest.starship_id)
        .bind(manifest.cargo_type_id)
        .bind(manifest.quantity)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn upsert_manifests(&self, manifests: &[NewManifest]) -> StoreResult<Vec<Manifest>> {
        if manifests.is_empty() {
            return Ok(Vec::new());
        }

        let starship_ids: Vec<Id> = manifests.iter().map(|m| m.starship_id).collect();
        let cargo_type_ids: Vec<Id> = manifests.iter().map(|m| m.cargo_type_id).collect();
        let quantities: Vec<i64> = manifests.iter().map(|m| m.quantity).collect();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query_as::<_, Manifest>(&format!(
            r#"
            INSERT INTO planet.manifest AS m (starship_id, cargo_type_id, quantity)
            SELECT * FROM UNNEST($1::bigint[], $2::bigint[], $3::bigint[])
            ON CONFLICT ON CONSTRAINT {UQ_MANIFEST_STARSHIP_CARGO}
            DO UPDATE SET quantity = m.quantity + EXCLUDED.quantity
            RETURNING {MANIFEST_COLUMNS}
            "#
        ))
        .bind(&starship_ids)
        .bind(&cargo_type_ids)
        .bind(&quantities)
        .fetch_all(&mut *tx)
        .await;

        match result.map_err(StoreError::from) {
            Ok(rows) => {
                tx.commit().await?;
                Ok(rows)
            }
            Err(err) if err.is_foreign_key_violation() => {
                tx.rollback().await?;
                info!("Manifest batch of {} rolled back: {}", manifests.len(), err);
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}

impl Store for PostgresStore {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_predicate() {
        assert_eq!(
            reference_predicate(&Reference::Id(1), "s", "sector_id", 2),
            "s.sector_id = $2"
        );
        assert_eq!(
            reference_predicate(&Reference::by_name("Core"), "c", "cargo_type_id", 3),
            "c.name = $3"
        );
    }
}
