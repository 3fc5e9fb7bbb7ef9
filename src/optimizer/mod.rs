//! Simulated-annealing schedule optimization.
//!
//! A single-solution trajectory search over placed schedules. Each
//! iteration clones the current schedule, applies one randomly chosen
//! neighbor move, and accepts the result by the Metropolis rule:
//! improving moves always, worsening moves with probability
//! `exp(delta / temperature)`. The best schedule seen is tracked
//! independently of the walked one, which may regress.
//!
//! Randomness is injected by the caller as a seedable [`rand::Rng`] so
//! tests can force exact move sequences.
//!
//! # Submodules
//!
//! - `config`: iteration budget and cooling parameters
//! - `objective`: the four-component weighted score
//! - `neighbor`: the three move operators
//! - `runner`: the annealing loop and its trace
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Anagnostopoulos et al. (2006), "A Simulated Annealing Approach to the
//!   Travelling Tournament Problem"

mod config;
mod neighbor;
mod objective;
mod runner;

pub use config::AnnealingConfig;
pub use objective::Objective;
pub use runner::{Annealer, OptimizationMetrics, TracePoint};
