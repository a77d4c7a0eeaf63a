pub const VALIDATION_ERROR_REQUIRED_FIELD: &str = "Field is required.";
pub const VALIDATION_ERROR_NEGATIVE_QUANTITY: &str = "Quantity must not be negative.";
pub const VALIDATION_ERROR_QUANTITY_TOO_LARGE: &str = "Quantity is too large.";
pub const VALIDATION_ERROR_INVALID_STARSHIP_OR_CARGO_TYPE: &str =
    "The starship id or cargo type id provided is invalid.";
pub const VALIDATION_ERROR_PLANET_ID_DOES_NOT_EXIST: &str = "The planet id does not exist.";
pub const VALIDATION_ERROR_STARSHIP_ID_DOES_NOT_EXIST: &str = "The starship id does not exist.";
pub const VALIDATION_ERROR_CARGO_TYPE_ID_DOES_NOT_EXIST: &str = "The cargo type id does not exist.";
pub const VALIDATION_ERROR_CARGO_TYPE_EXISTS: &str = "The cargo type name already exists.";
pub const VALIDATION_ERROR_PLANET_NAME_EXISTS: &str = "The planet name already exists.";
pub const INTERNAL_ERROR_SECTOR_NOT_RESOLVED: &str = "The sector could not be resolved.";
