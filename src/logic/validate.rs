use crate::model::{
    BulkCreateCargoTypeRequest, BulkCreateManifestRequest, CreateCargoTypeRequest,
    CreateManifestRequest, CreatePlanetRequest, CreateSectorRequest, CreateStarShipRequest,
    DeleteCargoTypeRequest, DeleteStarShipRequest, FieldErrors, Id, ManifestEntry,
    MoveStarShipRequest, Reference,
};
use crate::strings::en_za as strings;

/// Whether a request value counts as supplied. Blank strings, zero ids and
/// empty lists are treated the same as an absent field.
pub trait Provided {
    fn is_provided(&self) -> bool;
}

impl Provided for String {
    fn is_provided(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Provided for Id {
    fn is_provided(&self) -> bool {
        *self != 0
    }
}

impl<T> Provided for Vec<T> {
    fn is_provided(&self) -> bool {
        !self.is_empty()
    }
}

impl Provided for Reference {
    fn is_provided(&self) -> bool {
        self.is_set()
    }
}

impl<T: Provided> Provided for Option<T> {
    fn is_provided(&self) -> bool {
        self.as_ref().is_some_and(Provided::is_provided)
    }
}

/// Collects field errors for one request.
#[derive(Debug, Default)]
pub struct RequiredFields {
    errors: FieldErrors,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, field: impl Into<String>, value: &impl Provided) -> Self {
        if !value.is_provided() {
            self.errors
                .insert(field.into(), strings::VALIDATION_ERROR_REQUIRED_FIELD.to_string());
        }
        self
    }

    /// Reject negative quantities unless the field already has an error.
    pub fn non_negative(mut self, field: impl Into<String>, value: i64) -> Self {
        let field = field.into();
        if value < 0 && !self.errors.contains_key(&field) {
            self.errors
                .insert(field, strings::VALIDATION_ERROR_NEGATIVE_QUANTITY.to_string());
        }
        self
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

impl Validate for CreateSectorRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        RequiredFields::new()
            .require("sector_name", &self.sector_name)
            .finish()
    }
}

impl Validate for CreatePlanetRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        RequiredFields::new()
            .require("planet_name", &self.planet_name)
            .require("sector", &self.sector)
            .finish()
    }
}

impl Validate for CreateCargoTypeRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        RequiredFields::new()
            .require("cargo_name", &self.cargo_name)
            .finish()
    }
}

impl Validate for BulkCreateCargoTypeRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let fields = RequiredFields::new().require("cargo_names", &self.cargo_names);
        self.cargo_names
            .iter()
            .enumerate()
            .fold(fields, |fields, (index, name)| {
                fields.require(format!("cargo_names[{}]", index), name)
            })
            .finish()
    }
}

impl Validate for CreateStarShipRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        RequiredFields::new()
            .require("starship_name", &self.starship_name)
            .require("starship_model", &self.starship_model)
            .require("planet_id", &self.planet_id)
            .finish()
    }
}

impl Validate for CreateManifestRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        RequiredFields::new()
            .require("starship_id", &self.starship_id)
            .require("cargo_type_id", &self.cargo_type_id)
            .require("quantity", &self.quantity)
            .non_negative("quantity", self.quantity)
            .finish()
    }
}

fn require_entry(fields: RequiredFields, index: usize, entry: &ManifestEntry) -> RequiredFields {
    let key = |field: &str| format!("manifests[{}].{}", index, field);
    fields
        .require(key("starship_id"), &entry.starship_id)
        .require(key("cargo_type_id"), &entry.cargo_type_id)
        .require(key("quantity"), &entry.quantity)
        .non_negative(key("quantity"), entry.quantity)
}

impl Validate for BulkCreateManifestRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let fields = RequiredFields::new().require("manifests", &self.manifests);
        self.manifests
            .iter()
            .enumerate()
            .fold(fields, |fields, (index, entry)| {
                require_entry(fields, index, entry)
            })
            .finish()
    }
}

impl Validate for MoveStarShipRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        RequiredFields::new()
            .require("starship_id", &self.starship_id)
            .require("planet_id", &self.planet_id)
            .finish()
    }
}

impl Validate for DeleteCargoTypeRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        RequiredFields::new()
            .require("cargo_type_id", &self.cargo_type_id)
            .finish()
    }
}

impl Validate for DeleteStarShipRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        RequiredFields::new()
            .require("starship_id", &self.starship_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(fields: &[&str]) -> FieldErrors {
        fields
            .iter()
            .map(|f| (f.to_string(), strings::VALIDATION_ERROR_REQUIRED_FIELD.to_string()))
            .collect()
    }

    #[test]
    fn test_provided_values() {
        assert!("Hoth".to_string().is_provided());
        assert!(!"".to_string().is_provided());
        assert!(!"  ".to_string().is_provided());
        assert!(!(0 as Id).is_provided());
        assert!((5 as Id).is_provided());
        assert!(!Vec::<String>::new().is_provided());
        assert!(!None::<Reference>.is_provided());
        assert!(!Some(Reference::Id(0)).is_provided());
        assert!(Some(Reference::by_name("Core")).is_provided());
    }

    #[test]
    fn test_empty_requests_report_every_required_field() {
        assert_eq!(
            CreateStarShipRequest::default().validate(),
            Err(required(&["planet_id", "starship_model", "starship_name"]))
        );
        assert_eq!(
            CreatePlanetRequest::default().validate(),
            Err(required(&["planet_name", "sector"]))
        );
        assert_eq!(
            MoveStarShipRequest::default().validate(),
            Err(required(&["planet_id", "starship_id"]))
        );
        assert_eq!(
            CreateManifestRequest::default().validate(),
            Err(required(&["cargo_type_id", "quantity", "starship_id"]))
        );
    }

    #[test]
    fn test_only_missing_fields_are_reported() {
        let request = CreateStarShipRequest {
            starship_name: "Slave I".to_string(),
            starship_model: String::new(),
            planet_id: 3,
        };
        assert_eq!(request.validate(), Err(required(&["starship_model"])));

        let request = CreatePlanetRequest {
            planet_name: "Endor".to_string(),
            sector: Some(Reference::by_name("Moddell")),
            scarce_cargo: None,
        };
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn test_negative_quantity() {
        let request = CreateManifestRequest {
            starship_id: 1,
            cargo_type_id: 2,
            quantity: -4,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.get("quantity").map(String::as_str),
            Some(strings::VALIDATION_ERROR_NEGATIVE_QUANTITY)
        );
    }

    #[test]
    fn test_bulk_entries_are_keyed_by_index() {
        let request = BulkCreateManifestRequest {
            manifests: vec![
                ManifestEntry {
                    starship_id: 1,
                    cargo_type_id: 2,
                    quantity: 3,
                },
                ManifestEntry {
                    starship_id: 0,
                    cargo_type_id: 2,
                    quantity: 3,
                },
            ],
        };
        assert_eq!(request.validate(), Err(required(&["manifests[1].starship_id"])));

        assert_eq!(
            BulkCreateManifestRequest::default().validate(),
            Err(required(&["manifests"]))
        );
    }

    #[test]
    fn test_bulk_cargo_names() {
        let request = BulkCreateCargoTypeRequest {
            cargo_names: vec!["Spice".to_string(), " ".to_string()],
        };
        assert_eq!(request.validate(), Err(required(&["cargo_names[1]"])));
        assert_eq!(
            BulkCreateCargoTypeRequest::default().validate(),
            Err(required(&["cargo_names"]))
        );
    }
}
