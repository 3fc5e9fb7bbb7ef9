//! Scheduling domain models.
//!
//! Core data types threaded through the pipeline: reference data
//! (`Team`, `Constraint`, `ScheduleConfig`), fixture representations
//! (`Pairing` before roles are assigned, `Matchup` after), and the
//! owned solution aggregate (`Week`, `Schedule`).

mod config;
mod constraint;
mod matchup;
mod schedule;
mod team;
mod week;

pub use config::{CompetitionFormat, OptimizationFactors, ScheduleConfig, Sport};
pub use constraint::Constraint;
pub use matchup::{Matchup, MatchupKind, Pairing};
pub use schedule::{Schedule, Violation, ViolationType};
pub use team::{Coordinates, Team};
pub use week::Week;
