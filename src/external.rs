//! External collaborator seams.
//!
//! The pipeline consumes collaborators as opaque inputs it must
//! tolerate being absent or malformed. A failing collaborator never
//! aborts a run: the run proceeds with configured defaults and records
//! a failed sub-result for that collaborator only.
//!
//! Persistence is deliberately not a seam here: every model type is
//! plainly serializable (dates as calendar values, coordinates as
//! numeric pairs), and an external store saves or loads them without
//! the core performing any I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Constraint, OptimizationFactors, ScheduleConfig};

/// Failure surfaced by an external collaborator.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The collaborator had no data for this request.
    #[error("no data available: {0}")]
    Unavailable(String),
    /// The collaborator returned data the core cannot use.
    #[error("invalid data: {0}")]
    Invalid(String),
}

/// Supplies replacement objective weights for a run.
///
/// Returned weights are still checked by the pipeline; invalid ones
/// (negative or non-finite) count as a failed advisory.
pub trait WeightAdvisor {
    /// Advises weights for the given configuration.
    fn advise(&self, config: &ScheduleConfig) -> Result<OptimizationFactors, CollaboratorError>;
}

/// Advisor returning a fixed set of weights.
#[derive(Debug, Clone)]
pub struct StaticWeightAdvisor {
    factors: OptimizationFactors,
}

impl StaticWeightAdvisor {
    /// Creates an advisor that always returns `factors`.
    pub fn new(factors: OptimizationFactors) -> Self {
        Self { factors }
    }
}

impl WeightAdvisor for StaticWeightAdvisor {
    fn advise(&self, _config: &ScheduleConfig) -> Result<OptimizationFactors, CollaboratorError> {
        Ok(self.factors)
    }
}

/// Outcome of one collaborator interaction within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorReport {
    /// Collaborator name, e.g. "weight-advisor".
    pub collaborator: String,
    /// Whether the interaction succeeded.
    pub success: bool,
    /// Failure detail when `success` is false.
    pub detail: Option<String>,
}

impl CollaboratorReport {
    /// Creates a success report.
    pub fn success(collaborator: impl Into<String>) -> Self {
        Self {
            collaborator: collaborator.into(),
            success: true,
            detail: None,
        }
    }

    /// Creates a failure report with a detail message.
    pub fn failure(collaborator: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            collaborator: collaborator.into(),
            success: false,
            detail: Some(detail.into()),
        }
    }
}

/// One team's priority tier from a program-ranking feed.
///
/// Tier 1 is the highest priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTier {
    /// Ranked team.
    pub team_id: String,
    /// Priority tier, 1-based.
    pub tier: u8,
}

impl PriorityTier {
    /// Creates a tier record.
    pub fn new(team_id: impl Into<String>, tier: u8) -> Self {
        Self {
            team_id: team_id.into(),
            tier,
        }
    }
}

/// Translates ranking tiers into ordinary constraints.
///
/// The engine treats the result identically to user-supplied
/// constraints; there is no special-cased subtype. Tier 1 teams get
/// three premium windows, imbalance within one game, and away runs
/// capped at two; tier 2 gets two premium windows with caps of two and
/// three; tier 3 gets one premium window with tier-2 caps. Other tiers
/// add nothing.
pub fn constraints_from_tiers(tiers: &[PriorityTier]) -> Vec<Constraint> {
    let mut constraints = Vec::new();
    for ranked in tiers {
        let team = ranked.team_id.as_str();
        match ranked.tier {
            1 => {
                constraints.push(Constraint::min_premium_windows(team, 3));
                constraints.push(Constraint::max_home_away_imbalance(team, 1));
                constraints.push(Constraint::max_consecutive_away(team, 2));
            }
            2 => {
                constraints.push(Constraint::min_premium_windows(team, 2));
                constraints.push(Constraint::max_home_away_imbalance(team, 2));
                constraints.push(Constraint::max_consecutive_away(team, 3));
            }
            3 => {
                constraints.push(Constraint::min_premium_windows(team, 1));
                constraints.push(Constraint::max_home_away_imbalance(team, 2));
                constraints.push(Constraint::max_consecutive_away(team, 3));
            }
            _ => {}
        }
    }
    constraints
}
