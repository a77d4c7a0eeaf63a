use serde::{Deserialize, Serialize};

/// Primary keys are BIGSERIAL columns.
pub type Id = i64;

/// A foreign-key reference supplied by a caller, either by primary key or by
/// the referenced row's unique name.
///
/// Serialized externally tagged: `{"id": 3}` or `{"name": "Outer Rim"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference {
    Id(Id),
    Name(String),
}

impl Reference {
    pub fn by_name(name: impl Into<String>) -> Self {
        Reference::Name(name.into())
    }

    /// Strip surrounding whitespace from a name reference, matching how names
    /// are stored.
    pub fn trimmed(self) -> Self {
        match self {
            Reference::Name(name) => Reference::Name(name.trim().to_string()),
            reference => reference,
        }
    }

    /// True when the reference carries a usable key (non-zero id, non-blank name).
    pub fn is_set(&self) -> bool {
        match self {
            Reference::Id(id) => *id != 0,
            Reference::Name(name) => !name.trim().is_empty(),
        }
    }

    /// Does this reference point at the row with the given key and name?
    pub fn matches(&self, id: Id, name: &str) -> bool {
        match self {
            Reference::Id(wanted) => *wanted == id,
            Reference::Name(wanted) => wanted == name,
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Id(id) => write!(f, "id {}", id),
            Reference::Name(name) => write!(f, "name '{}'", name),
        }
    }
}
