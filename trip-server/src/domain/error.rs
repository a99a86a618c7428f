//! Domain error types.
//!
//! These errors represent validation failures on values coming in from
//! the outside. They are distinct from provider/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A calendar date was not in `YYYY-MM-DD` form
    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A coordinate was missing or not a finite number
    #[error("invalid coordinate {value:?}")]
    InvalidCoordinate { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidDate {
            value: "24/12/2021".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date \"24/12/2021\": expected YYYY-MM-DD"
        );

        let err = DomainError::InvalidCoordinate {
            value: "north".into(),
        };
        assert_eq!(err.to_string(), "invalid coordinate \"north\"");
    }
}
