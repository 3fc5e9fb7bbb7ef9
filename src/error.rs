//! Crate error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the scheduling pipeline.
///
/// Only structural configuration problems fail a run. Constraint
/// filters degrade fixtures into the unscheduled list instead of
/// erroring, and the optimizer treats impossible moves as no-ops.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Configuration failed structural validation; no partial schedule
    /// is produced.
    #[error("invalid configuration: {} issue(s) found", .0.len())]
    InvalidConfiguration(Vec<ValidationError>),
}

impl ScheduleError {
    /// The validation issues behind an `InvalidConfiguration` error.
    pub fn issues(&self) -> &[ValidationError] {
        match self {
            ScheduleError::InvalidConfiguration(issues) => issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ValidationError, ValidationErrorKind};

    #[test]
    fn test_error_display_counts_issues() {
        let err = ScheduleError::InvalidConfiguration(vec![
            ValidationError::new(ValidationErrorKind::TooFewTeams, "only 1 team"),
            ValidationError::new(ValidationErrorKind::InvalidSeasonRange, "end before start"),
        ]);
        assert_eq!(err.to_string(), "invalid configuration: 2 issue(s) found");
        assert_eq!(err.issues().len(), 2);
    }
}
