//! Annealing parameters.

use serde::{Deserialize, Serialize};

/// Simulated-annealing parameters.
///
/// The iteration budget is fixed: the loop never exits early on
/// convergence. Cooling is geometric, applied once per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Number of iterations to run.
    pub iterations: usize,
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Multiplier applied to the temperature every iteration.
    pub cooling_rate: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            initial_temperature: 100.0,
            cooling_rate: 0.95,
        }
    }
}

impl AnnealingConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the starting temperature.
    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Sets the geometric cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnnealingConfig::default();
        assert_eq!(config.iterations, 1000);
        assert!((config.initial_temperature - 100.0).abs() < 1e-12);
        assert!((config.cooling_rate - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_builders() {
        let config = AnnealingConfig::new()
            .with_iterations(50)
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.9);
        assert_eq!(config.iterations, 50);
        assert!((config.initial_temperature - 10.0).abs() < 1e-12);
        assert!((config.cooling_rate - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AnnealingConfig = serde_json::from_str(r#"{"iterations": 25}"#).unwrap();
        assert_eq!(config.iterations, 25);
        assert!((config.cooling_rate - 0.95).abs() < 1e-12);
    }
}
