use thiserror::Error;

/// Constraint names as declared in `migrations/`.
pub mod constraints {
    pub const UQ_PLANET_NAME: &str = "uq_planet_name";
    pub const UQ_MANIFEST_STARSHIP_CARGO: &str = "uq_manifest_starship_cargo";
    pub const CK_MANIFEST_QUANTITY_NON_NEGATIVE: &str = "ck_manifest_quantity_non_negative";
    pub const FK_STARSHIP_PLANET: &str = "fk_starship_planet_id_planet";
    pub const FK_MANIFEST_STARSHIP: &str = "fk_manifest_starship_id_starship";
    pub const FK_MANIFEST_CARGO_TYPE: &str = "fk_manifest_cargo_type_id_cargo_type";
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error("check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    /// An arithmetic result left the range of its column type.
    #[error("value out of range")]
    ValueOutOfRange,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn unique(constraint: &str) -> Self {
        StoreError::UniqueViolation {
            constraint: constraint.to_string(),
        }
    }

    pub fn foreign_key(constraint: &str) -> Self {
        StoreError::ForeignKeyViolation {
            constraint: constraint.to_string(),
        }
    }

    pub fn check(constraint: &str) -> Self {
        StoreError::CheckViolation {
            constraint: constraint.to_string(),
        }
    }

    /// Name of the violated constraint, for the constraint variants.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            StoreError::UniqueViolation { constraint }
            | StoreError::ForeignKeyViolation { constraint }
            | StoreError::CheckViolation { constraint } => Some(constraint),
            _ => None,
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, StoreError::ForeignKeyViolation { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        let (kind, constraint) = match &err {
            sqlx::Error::Database(db_err)
                if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) =>
            {
                return StoreError::ValueOutOfRange;
            }
            sqlx::Error::Database(db_err) => (
                db_err.kind(),
                db_err.constraint().unwrap_or_default().to_string(),
            ),
            _ => return StoreError::Database(err),
        };

        match kind {
            ErrorKind::UniqueViolation => StoreError::UniqueViolation { constraint },
            ErrorKind::ForeignKeyViolation => StoreError::ForeignKeyViolation { constraint },
            ErrorKind::CheckViolation => StoreError::CheckViolation { constraint },
            _ => StoreError::Database(err),
        }
    }
}
