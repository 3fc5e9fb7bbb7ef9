//! Competition season scheduling.
//!
//! Builds full season schedules for collegiate-style sports programs:
//! generates matchups under a competition format, places them on a
//! weekly calendar, filters them against institutional constraints,
//! improves the result with simulated annealing, and attaches
//! analytics to the final schedule.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Team`, `Constraint`, `ScheduleConfig`,
//!   `Pairing`, `Matchup`, `Week`, `Schedule`
//! - **`validation`**: Structural configuration checks run before generation
//! - **`generator`**: Matchup generation for six competition formats
//! - **`assign`**: Home/away role assignment and weekly calendar placement
//! - **`engine`**: Constraint filtering, feasibility checks, relaxation
//! - **`optimizer`**: Simulated-annealing schedule improvement
//! - **`analyzer`**: Post-run schedule metrics and per-team sub-schedules
//! - **`pipeline`**: The end-to-end run tying the stages together
//! - **`external`**: Optional collaborator seams (weight advisor, ranking feed)
//! - **`observer`**: Progress callbacks for embedders
//!
//! # Pipeline
//!
//! A run moves one [`models::Schedule`] through four stages:
//! generation (pairings, roles, weekly placement), constraint
//! filtering (fixed filter order, then feasibility-gated relaxation),
//! optimization (annealing over swap/flip/shift moves), and analysis.
//! Fixtures are conserved throughout: a fixture that cannot be placed
//! ends in the unscheduled list, never dropped.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use season_schedule::models::{CompetitionFormat, ScheduleConfig, Sport, Team};
//! use season_schedule::pipeline::SchedulePipeline;
//!
//! let config = ScheduleConfig::new(
//!     Sport::Basketball,
//!     CompetitionFormat::DoubleRoundRobin,
//!     NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
//!     NaiveDate::from_ymd_opt(2027, 2, 28).unwrap(),
//! )
//! .with_team(Team::new("tigers").with_venue("tigers-arena"))
//! .with_team(Team::new("bears").with_venue("bears-arena"))
//! .with_team(Team::new("eagles").with_venue("eagles-arena"))
//! .with_rivalry("tigers", "bears")
//! .with_seed(42);
//!
//! let outcome = SchedulePipeline::new().run(&config).unwrap();
//! assert_eq!(outcome.schedule.total_fixtures(), 6);
//! ```
//!
//! # References
//!
//! - Nemhauser & Trick (1998), "Scheduling a Major College Basketball
//!   Conference"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated
//!   Annealing"
//! - Kendall, Knust, Ribeiro & Urrutia (2010), "Scheduling in sports:
//!   An annotated bibliography"

pub mod analyzer;
pub mod assign;
pub mod engine;
pub mod error;
pub mod external;
pub mod generator;
pub mod models;
pub mod observer;
pub mod optimizer;
pub mod pipeline;
pub mod validation;
