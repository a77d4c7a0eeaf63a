use anyhow::Result;
use itertools::Itertools;
use log::{error, info, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::logic::respond::{map_row, map_rows, RpcResponse};
use crate::logic::validate::Validate;
use crate::model::{
    BulkCreateCargoTypeRequest, BulkCreateCargoTypeResponse, BulkCreateManifestRequest,
    BulkCreateManifestResponse, CreateCargoTypeRequest, CreateCargoTypeResponse,
    CreateManifestRequest, CreateManifestResponse, CreatePlanetRequest, CreatePlanetResponse,
    CreateSectorRequest, CreateSectorResponse, CreateStarShipRequest, CreateStarShipResponse,
    DeleteCargoTypeRequest, DeleteResponse, DeleteStarShipRequest, FieldErrors, Id,
    ManifestEntry, NewManifest, NewPlanet, NewStarShip, Reference, ResponseMessage,
};
use crate::store::{
    constraints, CargoTypeStore, ManifestStore, PlanetStore, SectorStore, StarShipStore,
    StoreError,
};
use crate::strings::en_za as strings;

/// Log a store fault that no response status covers and turn it into an
/// error for the transport to surface.
pub(crate) fn unexpected(operation: &str, err: StoreError) -> anyhow::Error {
    error!("{} failed with an unexpected store error: {}", operation, err);
    anyhow::Error::new(err).context(format!("{} failed", operation))
}

fn quantity_error(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), message.to_string());
    errors
}

/// Merge entries repeating a (starship, cargo type) pair by summing their
/// quantities. The first occurrence fixes the position of the pair. A sum
/// that does not fit in an `i64` is reported against the entry that
/// overflowed it.
pub fn aggregate_manifests(entries: &[ManifestEntry]) -> Result<Vec<NewManifest>, FieldErrors> {
    let mut merged: Vec<NewManifest> = Vec::with_capacity(entries.len());
    let mut positions: HashMap<(Id, Id), usize> = HashMap::new();

    for (index, entry) in entries.iter().enumerate() {
        let manifest = NewManifest::from(*entry);
        match positions.entry(manifest.key()) {
            Entry::Occupied(position) => {
                let target = &mut merged[*position.get()];
                target.quantity = target
                    .quantity
                    .checked_add(manifest.quantity)
                    .ok_or_else(|| {
                        quantity_error(
                            &format!("manifests[{}].quantity", index),
                            strings::VALIDATION_ERROR_QUANTITY_TOO_LARGE,
                        )
                    })?;
            }
            Entry::Vacant(slot) => {
                slot.insert(merged.len());
                merged.push(manifest);
            }
        }
    }

    Ok(merged)
}

/// Administrative operations that create and remove entities.
pub struct PlanetAdmin;

impl PlanetAdmin {
    /// Get-or-create a sector by name. Repeated calls return the same id.
    pub async fn create_sector<S: SectorStore>(
        store: &S,
        request: CreateSectorRequest,
    ) -> Result<CreateSectorResponse> {
        if let Err(errors) = request.validate() {
            return Ok(CreateSectorResponse::validation_error(errors));
        }

        let sector = store
            .upsert_sector(request.sector_name.trim())
            .await
            .map_err(|e| unexpected("CreateSector", e))?;

        info!("Sector '{}' resolved to id {}", sector.name, sector.sector_id);
        Ok(CreateSectorResponse::success(sector.sector_id))
    }

    pub async fn get_or_create_sector<S: SectorStore>(
        store: &S,
        request: CreateSectorRequest,
    ) -> Result<CreateSectorResponse> {
        Self::create_sector(store, request).await
    }

    pub async fn create_planet<S: PlanetStore>(
        store: &S,
        request: CreatePlanetRequest,
    ) -> Result<CreatePlanetResponse> {
        if let Err(errors) = request.validate() {
            return Ok(CreatePlanetResponse::validation_error(errors));
        }
        let CreatePlanetRequest {
            planet_name,
            sector: Some(sector),
            scarce_cargo,
        } = request
        else {
            // validate() rejects a missing sector
            return Ok(CreatePlanetResponse::failure(ResponseMessage::internal_error()));
        };

        let planet = NewPlanet {
            name: planet_name.trim().to_string(),
            sector: sector.trimmed(),
            scarce_cargo: scarce_cargo
                .filter(|reference| reference.is_set())
                .map(Reference::trimmed),
        };

        match store.insert_planet(&planet).await {
            Ok(Some(row)) => {
                info!("Created planet '{}' with id {}", row.name, row.planet_id);
                Ok(CreatePlanetResponse::success(row.planet_id))
            }
            Ok(None) => {
                warn!(
                    "Planet '{}' not created: sector {} did not resolve",
                    planet.name, planet.sector
                );
                Ok(CreatePlanetResponse::failure(
                    ResponseMessage::internal_error()
                        .with_message(strings::INTERNAL_ERROR_SECTOR_NOT_RESOLVED),
                ))
            }
            Err(StoreError::UniqueViolation { constraint })
                if constraint == constraints::UQ_PLANET_NAME =>
            {
                Ok(CreatePlanetResponse::failure(ResponseMessage::already_exists(
                    strings::VALIDATION_ERROR_PLANET_NAME_EXISTS,
                )))
            }
            Err(e) => Err(unexpected("CreatePlanet", e)),
        }
    }

    /// Get-or-create a cargo type by name. Repeated calls return the same id.
    pub async fn create_cargo_type<S: CargoTypeStore>(
        store: &S,
        request: CreateCargoTypeRequest,
    ) -> Result<CreateCargoTypeResponse> {
        if let Err(errors) = request.validate() {
            return Ok(CreateCargoTypeResponse::validation_error(errors));
        }

        let cargo_type = store
            .upsert_cargo_type(request.cargo_name.trim())
            .await
            .map_err(|e| unexpected("CreateCargoType", e))?;

        Ok(CreateCargoTypeResponse::success(cargo_type.cargo_type_id))
    }

    /// Insert every name that does not exist yet. Returns ALREADY_EXISTS when
    /// nothing new was inserted.
    pub async fn bulk_create_cargo_type<S: CargoTypeStore>(
        store: &S,
        request: BulkCreateCargoTypeRequest,
    ) -> Result<BulkCreateCargoTypeResponse> {
        if let Err(errors) = request.validate() {
            return Ok(BulkCreateCargoTypeResponse::validation_error(errors));
        }

        let names: Vec<String> = request
            .cargo_names
            .iter()
            .map(|name| name.trim().to_string())
            .unique()
            .collect();

        let inserted = store
            .insert_cargo_types(&names)
            .await
            .map_err(|e| unexpected("BulkCreateCargoType", e))?;

        info!(
            "Bulk cargo types: {} requested, {} inserted",
            names.len(),
            inserted.len()
        );
        Ok(map_rows(
            inserted,
            |cargo_type| cargo_type.cargo_type_id,
            || ResponseMessage::already_exists(strings::VALIDATION_ERROR_CARGO_TYPE_EXISTS),
        ))
    }

    pub async fn create_starship<S: StarShipStore>(
        store: &S,
        request: CreateStarShipRequest,
    ) -> Result<CreateStarShipResponse> {
        if let Err(errors) = request.validate() {
            return Ok(CreateStarShipResponse::validation_error(errors));
        }

        let starship = NewStarShip {
            name: request.starship_name.trim().to_string(),
            model: request.starship_model.trim().to_string(),
            planet_id: request.planet_id,
        };

        let row = store
            .insert_starship(&starship)
            .await
            .map_err(|e| unexpected("CreateStarShip", e))?;

        Ok(map_row(
            row,
            |row| row.starship_id,
            || ResponseMessage::not_found(strings::VALIDATION_ERROR_PLANET_ID_DOES_NOT_EXIST),
        ))
    }

    /// Create a manifest, or add the quantity to the existing manifest for the
    /// same starship and cargo type.
    pub async fn create_manifest<S: ManifestStore>(
        store: &S,
        request: CreateManifestRequest,
    ) -> Result<CreateManifestResponse> {
        if let Err(errors) = request.validate() {
            return Ok(CreateManifestResponse::validation_error(errors));
        }

        match store.upsert_manifest(&NewManifest::from(&request)).await {
            Ok(row) => Ok(map_row(
                row,
                |row| row.manifest_id,
                || {
                    ResponseMessage::not_found(
                        strings::VALIDATION_ERROR_INVALID_STARSHIP_OR_CARGO_TYPE,
                    )
                },
            )),
            Err(StoreError::CheckViolation { .. }) => Ok(CreateManifestResponse::validation_error(
                quantity_error("quantity", strings::VALIDATION_ERROR_NEGATIVE_QUANTITY),
            )),
            Err(StoreError::ValueOutOfRange) => Ok(CreateManifestResponse::validation_error(
                quantity_error("quantity", strings::VALIDATION_ERROR_QUANTITY_TOO_LARGE),
            )),
            Err(e) => Err(unexpected("CreateManifest", e)),
        }
    }

    /// Upsert a batch of manifests in one statement. Any unknown starship or
    /// cargo type rejects the whole batch with NOT_FOUND.
    pub async fn bulk_create_manifest<S: ManifestStore>(
        store: &S,
        request: BulkCreateManifestRequest,
    ) -> Result<BulkCreateManifestResponse> {
        if let Err(errors) = request.validate() {
            return Ok(BulkCreateManifestResponse::validation_error(errors));
        }

        let manifests = match aggregate_manifests(&request.manifests) {
            Ok(manifests) => manifests,
            Err(errors) => return Ok(BulkCreateManifestResponse::validation_error(errors)),
        };

        match store.upsert_manifests(&manifests).await {
            Ok(rows) => Ok(map_rows(
                rows,
                |row| row.manifest_id,
                || {
                    ResponseMessage::not_found(
                        strings::VALIDATION_ERROR_INVALID_STARSHIP_OR_CARGO_TYPE,
                    )
                },
            )),
            Err(StoreError::CheckViolation { .. }) => {
                Ok(BulkCreateManifestResponse::validation_error(quantity_error(
                    "manifests",
                    strings::VALIDATION_ERROR_NEGATIVE_QUANTITY,
                )))
            }
            Err(StoreError::ValueOutOfRange) => {
                Ok(BulkCreateManifestResponse::validation_error(quantity_error(
                    "manifests",
                    strings::VALIDATION_ERROR_QUANTITY_TOO_LARGE,
                )))
            }
            Err(e) => Err(unexpected("BulkCreateManifest", e)),
        }
    }

    pub async fn delete_cargo_type<S: CargoTypeStore>(
        store: &S,
        request: DeleteCargoTypeRequest,
    ) -> Result<DeleteResponse> {
        if let Err(errors) = request.validate() {
            return Ok(DeleteResponse::validation_error(errors));
        }

        let deleted = store
            .delete_cargo_type(request.cargo_type_id)
            .await
            .map_err(|e| unexpected("DeleteCargoType", e))?;

        Ok(if deleted {
            info!("Deleted cargo type {}", request.cargo_type_id);
            DeleteResponse::success(())
        } else {
            DeleteResponse::failure(ResponseMessage::not_found(
                strings::VALIDATION_ERROR_CARGO_TYPE_ID_DOES_NOT_EXIST,
            ))
        })
    }

    pub async fn delete_starship<S: StarShipStore>(
        store: &S,
        request: DeleteStarShipRequest,
    ) -> Result<DeleteResponse> {
        if let Err(errors) = request.validate() {
            return Ok(DeleteResponse::validation_error(errors));
        }

        let deleted = store
            .delete_starship(request.starship_id)
            .await
            .map_err(|e| unexpected("DeleteStarShip", e))?;

        Ok(if deleted {
            info!("Deleted starship {}", request.starship_id);
            DeleteResponse::success(())
        } else {
            DeleteResponse::failure(ResponseMessage::not_found(
                strings::VALIDATION_ERROR_STARSHIP_ID_DOES_NOT_EXIST,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusCode;
    use crate::store::InMemoryStore;

    fn manifest(starship_id: Id, cargo_type_id: Id, quantity: i64) -> ManifestEntry {
        ManifestEntry {
            starship_id,
            cargo_type_id,
            quantity,
        }
    }

    struct Fixture {
        store: InMemoryStore,
        sector_id: Id,
        planet_id: Id,
        starship_id: Id,
        cargo_type_id: Id,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let sector_id = PlanetAdmin::create_sector(
            &store,
            CreateSectorRequest {
                sector_name: "Outer Rim".to_string(),
            },
        )
        .await
        .unwrap()
        .sector_id
        .unwrap();
        let planet_id = PlanetAdmin::create_planet(
            &store,
            CreatePlanetRequest {
                planet_name: "Tatooine".to_string(),
                sector: Some(Reference::Id(sector_id)),
                scarce_cargo: None,
            },
        )
        .await
        .unwrap()
        .planet_id
        .unwrap();
        let starship_id = PlanetAdmin::create_starship(
            &store,
            CreateStarShipRequest {
                starship_name: "Millennium Falcon".to_string(),
                starship_model: "YT-1300".to_string(),
                planet_id,
            },
        )
        .await
        .unwrap()
        .starship_id
        .unwrap();
        let cargo_type_id = PlanetAdmin::create_cargo_type(
            &store,
            CreateCargoTypeRequest {
                cargo_name: "Coaxium".to_string(),
            },
        )
        .await
        .unwrap()
        .cargo_type_id
        .unwrap();

        Fixture {
            store,
            sector_id,
            planet_id,
            starship_id,
            cargo_type_id,
        }
    }

    #[test]
    fn test_aggregate_manifests_sums_repeated_pairs() {
        let merged = aggregate_manifests(&[
            manifest(1, 2, 5),
            manifest(1, 3, 1),
            manifest(1, 2, 7),
        ]);
        assert_eq!(
            merged,
            Ok(vec![NewManifest::new(1, 2, 12), NewManifest::new(1, 3, 1)])
        );
    }

    #[test]
    fn test_aggregate_manifests_reports_overflowing_entry() {
        let errors = aggregate_manifests(&[
            manifest(1, 2, i64::MAX),
            manifest(1, 3, i64::MAX),
            manifest(1, 2, 1),
        ])
        .unwrap_err();
        assert_eq!(
            errors.get("manifests[2].quantity").map(String::as_str),
            Some(strings::VALIDATION_ERROR_QUANTITY_TOO_LARGE)
        );
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_create_sector_validation_does_not_touch_store() {
        let store = InMemoryStore::new();
        let response = PlanetAdmin::create_sector(&store, CreateSectorRequest::default())
            .await
            .unwrap();

        assert_eq!(response.message.status_code, StatusCode::ValidationError);
        assert_eq!(
            response.message.error_fields.get("sector_name").map(String::as_str),
            Some(strings::VALIDATION_ERROR_REQUIRED_FIELD)
        );
        assert_eq!(response.message.error_fields.len(), 1);
        assert_eq!(store.sector_count(), 0);
    }

    #[tokio::test]
    async fn test_get_or_create_sector_is_idempotent() {
        let store = InMemoryStore::new();
        let request = CreateSectorRequest {
            sector_name: "Mid Rim".to_string(),
        };
        let first = PlanetAdmin::get_or_create_sector(&store, request.clone())
            .await
            .unwrap();
        let second = PlanetAdmin::get_or_create_sector(&store, request).await.unwrap();

        assert!(first.message.is_success());
        assert_eq!(first.sector_id, second.sector_id);
        assert_eq!(store.sector_count(), 1);
    }

    #[tokio::test]
    async fn test_create_cargo_type_is_idempotent() {
        let f = fixture().await;
        let again = PlanetAdmin::create_cargo_type(
            &f.store,
            CreateCargoTypeRequest {
                cargo_name: "Coaxium".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(again.cargo_type_id, Some(f.cargo_type_id));
        assert_eq!(f.store.cargo_type_count(), 1);
    }

    #[tokio::test]
    async fn test_create_planet_resolves_sector_by_name_and_scarce_cargo() {
        let f = fixture().await;
        let response = PlanetAdmin::create_planet(
            &f.store,
            CreatePlanetRequest {
                planet_name: "Jakku".to_string(),
                sector: Some(Reference::by_name("Outer Rim")),
                scarce_cargo: Some(Reference::Id(f.cargo_type_id)),
            },
        )
        .await
        .unwrap();

        assert!(response.message.is_success());
        let planet = f.store.planet(response.planet_id.unwrap()).unwrap();
        assert_eq!(planet.sector_id, f.sector_id);
        assert_eq!(planet.scarce_cargo_type_id, Some(f.cargo_type_id));
    }

    #[tokio::test]
    async fn test_create_planet_trims_name_references() {
        let f = fixture().await;
        let response = PlanetAdmin::create_planet(
            &f.store,
            CreatePlanetRequest {
                planet_name: "Ryloth".to_string(),
                sector: Some(Reference::by_name(" Outer Rim ")),
                scarce_cargo: Some(Reference::by_name("Coaxium  ")),
            },
        )
        .await
        .unwrap();

        assert!(response.message.is_success());
        let planet = f.store.planet(response.planet_id.unwrap()).unwrap();
        assert_eq!(planet.sector_id, f.sector_id);
        assert_eq!(planet.scarce_cargo_type_id, Some(f.cargo_type_id));
    }

    #[tokio::test]
    async fn test_create_planet_with_unknown_scarce_cargo_succeeds() {
        let f = fixture().await;
        let response = PlanetAdmin::create_planet(
            &f.store,
            CreatePlanetRequest {
                planet_name: "Geonosis".to_string(),
                sector: Some(Reference::Id(f.sector_id)),
                scarce_cargo: Some(Reference::by_name("Kyber")),
            },
        )
        .await
        .unwrap();

        assert!(response.message.is_success());
        let planet = f.store.planet(response.planet_id.unwrap()).unwrap();
        assert_eq!(planet.scarce_cargo_type_id, None);
    }

    #[tokio::test]
    async fn test_create_planet_with_unknown_sector_is_internal_error() {
        let f = fixture().await;
        let response = PlanetAdmin::create_planet(
            &f.store,
            CreatePlanetRequest {
                planet_name: "Dagobah".to_string(),
                sector: Some(Reference::Id(999)),
                scarce_cargo: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.message.status_code, StatusCode::InternalError);
        assert_eq!(response.planet_id, None);
        assert_eq!(f.store.planet_count(), 1);
    }

    #[tokio::test]
    async fn test_create_planet_duplicate_name_already_exists() {
        let f = fixture().await;
        let response = PlanetAdmin::create_planet(
            &f.store,
            CreatePlanetRequest {
                planet_name: "Tatooine".to_string(),
                sector: Some(Reference::Id(f.sector_id)),
                scarce_cargo: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.message.status_code, StatusCode::AlreadyExists);
        assert_eq!(f.store.planet_count(), 1);
    }

    #[tokio::test]
    async fn test_create_starship_unknown_planet_is_not_found() {
        let f = fixture().await;
        let response = PlanetAdmin::create_starship(
            &f.store,
            CreateStarShipRequest {
                starship_name: "Ghost".to_string(),
                starship_model: "VCX-100".to_string(),
                planet_id: 999,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.message.status_code, StatusCode::NotFound);
        assert_eq!(
            response.message.message.as_deref(),
            Some(strings::VALIDATION_ERROR_PLANET_ID_DOES_NOT_EXIST)
        );
        assert_eq!(f.store.starship_count(), 1);
    }

    #[tokio::test]
    async fn test_create_starship_success() {
        let f = fixture().await;
        let response = PlanetAdmin::create_starship(
            &f.store,
            CreateStarShipRequest {
                starship_name: "Ghost".to_string(),
                starship_model: "VCX-100".to_string(),
                planet_id: f.planet_id,
            },
        )
        .await
        .unwrap();

        assert!(response.message.is_success());
        assert_ne!(response.starship_id, Some(f.starship_id));
        assert_eq!(f.store.starship_count(), 2);
    }

    #[tokio::test]
    async fn test_create_manifest_accumulates_quantity() {
        let f = fixture().await;
        let request = |quantity| CreateManifestRequest {
            starship_id: f.starship_id,
            cargo_type_id: f.cargo_type_id,
            quantity,
        };

        let first = PlanetAdmin::create_manifest(&f.store, request(10)).await.unwrap();
        let second = PlanetAdmin::create_manifest(&f.store, request(15)).await.unwrap();

        assert!(first.message.is_success());
        assert_eq!(first.manifest_id, second.manifest_id);
        assert_eq!(f.store.manifest_count(), 1);
        assert_eq!(
            f.store
                .manifest(f.starship_id, f.cargo_type_id)
                .unwrap()
                .quantity,
            25
        );
    }

    #[tokio::test]
    async fn test_create_manifest_unknown_reference_is_not_found() {
        let f = fixture().await;
        let response = PlanetAdmin::create_manifest(
            &f.store,
            CreateManifestRequest {
                starship_id: f.starship_id,
                cargo_type_id: 999,
                quantity: 1,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.message.status_code, StatusCode::NotFound);
        assert_eq!(f.store.manifest_count(), 0);
    }

    #[tokio::test]
    async fn test_create_manifest_negative_quantity_is_rejected() {
        let f = fixture().await;
        let response = PlanetAdmin::create_manifest(
            &f.store,
            CreateManifestRequest {
                starship_id: f.starship_id,
                cargo_type_id: f.cargo_type_id,
                quantity: -2,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.message.status_code, StatusCode::ValidationError);
        assert_eq!(f.store.manifest_count(), 0);
    }

    #[tokio::test]
    async fn test_create_manifest_quantity_overflow_is_rejected() {
        let f = fixture().await;
        let request = |quantity| CreateManifestRequest {
            starship_id: f.starship_id,
            cargo_type_id: f.cargo_type_id,
            quantity,
        };

        let first = PlanetAdmin::create_manifest(&f.store, request(i64::MAX))
            .await
            .unwrap();
        assert!(first.message.is_success());

        let response = PlanetAdmin::create_manifest(&f.store, request(1)).await.unwrap();
        assert_eq!(response.message.status_code, StatusCode::ValidationError);
        assert_eq!(
            response.message.error_fields.get("quantity").map(String::as_str),
            Some(strings::VALIDATION_ERROR_QUANTITY_TOO_LARGE)
        );
        assert_eq!(
            f.store
                .manifest(f.starship_id, f.cargo_type_id)
                .unwrap()
                .quantity,
            i64::MAX
        );
    }

    #[tokio::test]
    async fn test_bulk_create_cargo_type() {
        let f = fixture().await;
        let request = BulkCreateCargoTypeRequest {
            cargo_names: vec![
                "Coaxium".to_string(),
                "Spice".to_string(),
                "Spice".to_string(),
                "Durasteel".to_string(),
            ],
        };

        let response = PlanetAdmin::bulk_create_cargo_type(&f.store, request.clone())
            .await
            .unwrap();
        assert!(response.message.is_success());
        assert_eq!(response.cargo_type_ids.len(), 2);
        assert_eq!(f.store.cargo_type_count(), 3);

        let response = PlanetAdmin::bulk_create_cargo_type(&f.store, request)
            .await
            .unwrap();
        assert_eq!(response.message.status_code, StatusCode::AlreadyExists);
        assert!(response.cargo_type_ids.is_empty());
    }

    #[tokio::test]
    async fn test_bulk_create_cargo_type_empty_list() {
        let store = InMemoryStore::new();
        let response =
            PlanetAdmin::bulk_create_cargo_type(&store, BulkCreateCargoTypeRequest::default())
                .await
                .unwrap();
        assert_eq!(response.message.status_code, StatusCode::ValidationError);
        assert!(response.message.error_fields.contains_key("cargo_names"));
    }

    #[tokio::test]
    async fn test_bulk_create_manifest_merges_and_accumulates() {
        let f = fixture().await;
        let spice = f.store.upsert_cargo_type("Spice").await.unwrap().cargo_type_id;

        PlanetAdmin::create_manifest(
            &f.store,
            CreateManifestRequest {
                starship_id: f.starship_id,
                cargo_type_id: f.cargo_type_id,
                quantity: 1,
            },
        )
        .await
        .unwrap();

        let response = PlanetAdmin::bulk_create_manifest(
            &f.store,
            BulkCreateManifestRequest {
                manifests: vec![
                    manifest(f.starship_id, f.cargo_type_id, 4),
                    manifest(f.starship_id, spice, 3),
                    manifest(f.starship_id, f.cargo_type_id, 5),
                ],
            },
        )
        .await
        .unwrap();

        assert!(response.message.is_success());
        assert_eq!(response.manifest_ids.len(), 2);
        assert_eq!(
            f.store
                .manifest(f.starship_id, f.cargo_type_id)
                .unwrap()
                .quantity,
            10
        );
        assert_eq!(f.store.manifest(f.starship_id, spice).unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_bulk_create_manifest_rejects_whole_batch() {
        let f = fixture().await;
        let response = PlanetAdmin::bulk_create_manifest(
            &f.store,
            BulkCreateManifestRequest {
                manifests: vec![
                    manifest(f.starship_id, f.cargo_type_id, 4),
                    manifest(999, f.cargo_type_id, 1),
                ],
            },
        )
        .await
        .unwrap();

        assert_eq!(response.message.status_code, StatusCode::NotFound);
        assert!(response.manifest_ids.is_empty());
        assert_eq!(f.store.manifest_count(), 0);
    }

    #[tokio::test]
    async fn test_bulk_create_manifest_quantity_overflow_is_rejected() {
        let f = fixture().await;
        let response = PlanetAdmin::bulk_create_manifest(
            &f.store,
            BulkCreateManifestRequest {
                manifests: vec![
                    manifest(f.starship_id, f.cargo_type_id, i64::MAX),
                    manifest(f.starship_id, f.cargo_type_id, i64::MAX),
                ],
            },
        )
        .await
        .unwrap();

        assert_eq!(response.message.status_code, StatusCode::ValidationError);
        assert_eq!(
            response
                .message
                .error_fields
                .get("manifests[1].quantity")
                .map(String::as_str),
            Some(strings::VALIDATION_ERROR_QUANTITY_TOO_LARGE)
        );
        assert_eq!(f.store.manifest_count(), 0);

        PlanetAdmin::create_manifest(
            &f.store,
            CreateManifestRequest {
                starship_id: f.starship_id,
                cargo_type_id: f.cargo_type_id,
                quantity: 10,
            },
        )
        .await
        .unwrap();
        let response = PlanetAdmin::bulk_create_manifest(
            &f.store,
            BulkCreateManifestRequest {
                manifests: vec![manifest(f.starship_id, f.cargo_type_id, i64::MAX)],
            },
        )
        .await
        .unwrap();
        assert_eq!(response.message.status_code, StatusCode::ValidationError);
        assert!(response.message.error_fields.contains_key("manifests"));
        assert_eq!(
            f.store
                .manifest(f.starship_id, f.cargo_type_id)
                .unwrap()
                .quantity,
            10
        );
    }

    #[tokio::test]
    async fn test_delete_cargo_type_cascades() {
        let f = fixture().await;
        PlanetAdmin::create_manifest(
            &f.store,
            CreateManifestRequest {
                starship_id: f.starship_id,
                cargo_type_id: f.cargo_type_id,
                quantity: 3,
            },
        )
        .await
        .unwrap();

        let response = PlanetAdmin::delete_cargo_type(
            &f.store,
            DeleteCargoTypeRequest {
                cargo_type_id: f.cargo_type_id,
            },
        )
        .await
        .unwrap();
        assert!(response.message.is_success());
        assert_eq!(f.store.manifest_count(), 0);

        let response = PlanetAdmin::delete_cargo_type(
            &f.store,
            DeleteCargoTypeRequest {
                cargo_type_id: f.cargo_type_id,
            },
        )
        .await
        .unwrap();
        assert_eq!(response.message.status_code, StatusCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_starship_cascades() {
        let f = fixture().await;
        PlanetAdmin::create_manifest(
            &f.store,
            CreateManifestRequest {
                starship_id: f.starship_id,
                cargo_type_id: f.cargo_type_id,
                quantity: 3,
            },
        )
        .await
        .unwrap();

        let response = PlanetAdmin::delete_starship(
            &f.store,
            DeleteStarShipRequest {
                starship_id: f.starship_id,
            },
        )
        .await
        .unwrap();
        assert!(response.message.is_success());
        assert_eq!(f.store.manifest_count(), 0);
        assert_eq!(f.store.starship_count(), 0);
    }
}
