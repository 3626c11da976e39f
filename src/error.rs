//! Error types for the georegistry engine.
//!
//! Every rejection in this crate stems from caller input: there is no I/O,
//! so nothing here is transient or retryable.

use thiserror::Error;

/// Convenience alias used by all fallible operations in the crate.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Error taxonomy for registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Malformed caller input outside the more specific categories below.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Radius or coordinate outside its valid range.
    #[error("Invalid geography: {0}")]
    InvalidGeography(String),

    /// A sort literal that names no known field.
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// A municipality type literal that names no known classification.
    #[error("Unknown municipality type: {0}")]
    UnknownMunicipalityType(String),

    /// A projection field literal not recognized for the entity type.
    #[error("Unknown {entity} field: {name}")]
    UnknownField {
        entity: &'static str,
        name: String,
    },

    /// A paired range filter where the lower bound exceeds the upper bound.
    #[error("Invalid {field} range: from {from} exceeds to {to}")]
    InvalidRange {
        field: &'static str,
        from: f64,
        to: f64,
    },

    /// A code that collides case-insensitively within its scope.
    #[error("Duplicate code within scope: {0}")]
    DuplicateCode(String),

    /// A referenced parent entity that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A configuration value outside its permitted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RegistryError::InvalidGeography("radius must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid geography: radius must be positive");

        let err = RegistryError::UnknownField {
            entity: "ward",
            name: "color".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown ward field: color");

        let err = RegistryError::InvalidRange {
            field: "population",
            from: 10.0,
            to: 5.0,
        };
        assert_eq!(err.to_string(), "Invalid population range: from 10 exceeds to 5");
    }
}
