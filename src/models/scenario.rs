use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PopulationError;
use crate::models::HistoricalSeries;

/// A named "what-if" preset: growth rate plus carrying capacity expressed as
/// a multiplier of the historical maximum population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub growth_rate: f64,
    pub capacity_ratio: f64,
}

/// Concrete logistic parameters resolved for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub growth_rate: f64,
    pub carrying_capacity: f64,
}

impl ScenarioParams {
    /// Check the capacity against the most recent observation.
    ///
    /// A capacity strictly below the last observed population makes the
    /// fitted curve immediately saturated; it is reported, never clamped.
    /// Capacity equal to the last observation is allowed: the projection
    /// then approaches it from below.
    pub fn validate(&self, series: &HistoricalSeries) -> Result<(), PopulationError> {
        if !self.growth_rate.is_finite() || self.growth_rate <= 0.0 {
            return Err(PopulationError::ValidationError(format!(
                "scenario growth rate must be positive, got {}",
                self.growth_rate
            )));
        }
        if !self.carrying_capacity.is_finite() || self.carrying_capacity <= 0.0 {
            return Err(PopulationError::ValidationError(format!(
                "scenario carrying capacity must be positive, got {}",
                self.carrying_capacity
            )));
        }
        if let Some(last) = series.last_population() {
            if self.carrying_capacity < last {
                return Err(PopulationError::DegenerateCapacity(format!(
                    "carrying capacity {:.2} is below the last observed population {:.2}",
                    self.carrying_capacity, last
                )));
            }
        }
        Ok(())
    }
}

/// Read-only table of named scenarios, loaded once as configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioTable {
    pub scenarios: BTreeMap<String, ScenarioSpec>,
}

impl Default for ScenarioTable {
    /// The built-in presets: High, Moderate, and Low Growth.
    fn default() -> Self {
        let mut scenarios = BTreeMap::new();
        scenarios.insert(
            "High Growth".to_string(),
            ScenarioSpec {
                growth_rate: 0.02,
                capacity_ratio: 1.2,
            },
        );
        scenarios.insert(
            "Moderate Growth".to_string(),
            ScenarioSpec {
                growth_rate: 0.01,
                capacity_ratio: 1.0,
            },
        );
        scenarios.insert(
            "Low Growth".to_string(),
            ScenarioSpec {
                growth_rate: 0.005,
                capacity_ratio: 0.8,
            },
        );
        Self { scenarios }
    }
}

impl ScenarioTable {
    /// Look up a raw scenario spec by name.
    pub fn resolve_spec(&self, name: &str) -> Result<&ScenarioSpec, PopulationError> {
        self.scenarios
            .get(name)
            .ok_or_else(|| PopulationError::UnknownScenario(name.to_string()))
    }

    /// Check every spec for positive, finite rate and capacity ratio.
    /// Degenerate capacity is dataset-dependent and checked later, at
    /// resolution time.
    pub fn validate(&self) -> Result<(), PopulationError> {
        for (name, spec) in &self.scenarios {
            if !spec.growth_rate.is_finite() || spec.growth_rate <= 0.0 {
                return Err(PopulationError::ValidationError(format!(
                    "scenario '{name}': growth rate must be positive, got {}",
                    spec.growth_rate
                )));
            }
            if !spec.capacity_ratio.is_finite() || spec.capacity_ratio <= 0.0 {
                return Err(PopulationError::ValidationError(format!(
                    "scenario '{name}': capacity ratio must be positive, got {}",
                    spec.capacity_ratio
                )));
            }
        }
        Ok(())
    }

    /// Resolve a scenario name into concrete parameters for one series.
    pub fn resolve(
        &self,
        name: &str,
        series: &HistoricalSeries,
    ) -> Result<ScenarioParams, PopulationError> {
        let spec = self
            .scenarios
            .get(name)
            .ok_or_else(|| PopulationError::UnknownScenario(name.to_string()))?;
        Ok(ScenarioParams {
            growth_rate: spec.growth_rate,
            carrying_capacity: spec.capacity_ratio * series.max_population(),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenarios.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brazil() -> HistoricalSeries {
        HistoricalSeries::new(
            vec![1800, 1850, 1900, 1950, 2000, 2023],
            vec![4.5, 9.1, 17.4, 51.9, 174.4, 215.3],
        )
    }

    #[test]
    fn test_default_table_has_three_presets() {
        let table = ScenarioTable::default();
        assert_eq!(table.names(), vec!["High Growth", "Low Growth", "Moderate Growth"]);
    }

    #[test]
    fn test_resolve_high_growth() {
        let table = ScenarioTable::default();
        let params = table.resolve("High Growth", &brazil()).unwrap();
        assert!((params.growth_rate - 0.02).abs() < 1e-12);
        assert!((params.carrying_capacity - 1.2 * 215.3).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_moderate_growth() {
        let table = ScenarioTable::default();
        let params = table.resolve("Moderate Growth", &brazil()).unwrap();
        assert!((params.carrying_capacity - 215.3).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_unknown_scenario() {
        let table = ScenarioTable::default();
        let err = table.resolve("Ultra Growth", &brazil()).unwrap_err();
        assert!(matches!(err, PopulationError::UnknownScenario(_)));
        assert!(err.to_string().contains("Ultra Growth"));
    }

    #[test]
    fn test_params_validate_ok_at_equality() {
        // K equal to the last observation saturates but is not degenerate.
        let params = ScenarioParams {
            growth_rate: 0.01,
            carrying_capacity: 215.3,
        };
        assert!(params.validate(&brazil()).is_ok());
    }

    #[test]
    fn test_params_validate_degenerate_capacity() {
        let params = ScenarioParams {
            growth_rate: 0.005,
            carrying_capacity: 0.8 * 215.3,
        };
        let err = params.validate(&brazil()).unwrap_err();
        assert!(matches!(err, PopulationError::DegenerateCapacity(_)));
    }

    #[test]
    fn test_params_validate_non_positive_rate() {
        let params = ScenarioParams {
            growth_rate: 0.0,
            carrying_capacity: 300.0,
        };
        assert!(params.validate(&brazil()).is_err());
    }

    #[test]
    fn test_table_toml_roundtrip() {
        let table = ScenarioTable::default();
        let text = toml::to_string(&table).unwrap();
        let back: ScenarioTable = toml::from_str(&text).unwrap();
        assert_eq!(back, table);
    }
}
