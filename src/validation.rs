//! Configuration validation.
//!
//! Checks structural integrity of a run configuration before any
//! generation happens. Generation fails fast on these; nothing later
//! in the pipeline re-checks them. Detects:
//! - Too few teams
//! - Inverted season or constraint date ranges
//! - Duplicate team IDs
//! - Constraints referencing unknown teams
//! - Format parameters that cannot produce fixtures

use std::collections::HashSet;

use crate::models::{CompetitionFormat, Constraint, ScheduleConfig};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Fewer than two teams configured.
    TooFewTeams,
    /// Season end precedes season start.
    InvalidSeasonRange,
    /// Two teams share the same ID.
    DuplicateId,
    /// A constraint references a team that doesn't exist.
    UnknownTeam,
    /// A constraint's date range is inverted.
    InvalidDateRange,
    /// A per-team game target that cannot generate fixtures.
    InvalidGameTarget,
    /// Divisional format with teams lacking a division tag.
    MissingDivision,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a run configuration.
///
/// Checks:
/// 1. At least two teams
/// 2. `season_start <= season_end`
/// 3. No duplicate team IDs (affiliates included)
/// 4. Partial round-robin has a nonzero `games_per_team`
/// 5. Series format has a nonzero `series_length`
/// 6. Divisional format teams all carry a division tag
/// 7. Team-scoped constraints reference known teams
/// 8. Constraint date ranges are not inverted
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &ScheduleConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.teams.len() < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewTeams,
            format!("{} team(s) configured, need at least 2", config.teams.len()),
        ));
    }

    if config.season_end < config.season_start {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSeasonRange,
            format!(
                "season end {} precedes season start {}",
                config.season_end, config.season_start
            ),
        ));
    }

    // Collect team IDs, affiliates included
    let mut team_ids: HashSet<&str> = HashSet::new();
    for team in config.teams.iter().chain(config.affiliates.iter()) {
        if !team_ids.insert(team.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate team ID: {}", team.id),
            ));
        }
    }

    if config.format == CompetitionFormat::PartialRoundRobin && config.games_per_team == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGameTarget,
            "partial round-robin requires games_per_team >= 1",
        ));
    }

    if config.format == CompetitionFormat::ThreeGameSeries && config.series_length == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGameTarget,
            "series format requires series_length >= 1",
        ));
    }

    if config.format == CompetitionFormat::Divisional {
        for team in &config.teams {
            if team.division.is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingDivision,
                    format!("Team '{}' has no division tag", team.id),
                ));
            }
        }
    }

    // Check team references and date ranges in constraints. Existing
    // commitments may involve opponents outside the configured pool,
    // so their team IDs are not checked.
    for constraint in &config.constraints {
        let scoped_team = match constraint {
            Constraint::NoPlayDayOfWeek { team_id, .. }
            | Constraint::NoPlayDateRange { team_id, .. }
            | Constraint::AcademicBlackout { team_id, .. }
            | Constraint::MinPremiumWindows { team_id, .. }
            | Constraint::MaxHomeAwayImbalance { team_id, .. }
            | Constraint::MaxConsecutiveAway { team_id, .. } => Some(team_id.as_str()),
            _ => None,
        };
        if let Some(team_id) = scoped_team {
            if !team_ids.contains(team_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTeam,
                    format!("Constraint references unknown team '{team_id}'"),
                ));
            }
        }

        if let Some((start, end)) = constraint.date_range() {
            if end < start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDateRange,
                    format!("Constraint date range {start}..{end} is inverted"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
