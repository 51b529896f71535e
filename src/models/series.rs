use serde::{Deserialize, Serialize};

use crate::error::PopulationError;

/// One sample of an accumulated or projected series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearPoint {
    pub year: i32,
    pub cumulative_value: f64,
}

/// Contextual vital rates carried alongside a historical series, per 1000
/// people per year. Display metadata only; the logistic fitter never reads
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalRates {
    pub birth_rate: f64,
    pub death_rate: f64,
    pub migration_rate: f64,
}

/// Sparse historical population observations for one dataset.
///
/// `years` and `population` are parallel sequences; years strictly increase
/// and every population value is positive (the logistic model is undefined
/// at zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub years: Vec<i32>,
    pub population: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vital_rates: Option<VitalRates>,
}

impl HistoricalSeries {
    pub fn new(years: Vec<i32>, population: Vec<f64>) -> Self {
        Self {
            years,
            population,
            vital_rates: None,
        }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Largest observed population. Zero for an empty series.
    pub fn max_population(&self) -> f64 {
        self.population.iter().copied().fold(0.0, f64::max)
    }

    /// Most recent observed population, if any.
    pub fn last_population(&self) -> Option<f64> {
        self.population.last().copied()
    }

    /// Most recent observed year, if any.
    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// First observed year; the fitter's time origin.
    pub fn first_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    /// Validate shape and positivity requirements for fitting.
    pub fn validate(&self) -> Result<(), PopulationError> {
        if self.years.len() != self.population.len() {
            return Err(PopulationError::ValidationError(format!(
                "series has {} years but {} population values",
                self.years.len(),
                self.population.len()
            )));
        }
        for pair in self.years.windows(2) {
            if pair[1] <= pair[0] {
                return Err(PopulationError::ValidationError(format!(
                    "series years must strictly increase, got {} after {}",
                    pair[1], pair[0]
                )));
            }
        }
        for (&year, &pop) in self.years.iter().zip(&self.population) {
            if !pop.is_finite() || pop <= 0.0 {
                return Err(PopulationError::ValidationError(format!(
                    "population at year {year} must be positive, got {pop}"
                )));
            }
        }
        Ok(())
    }
}
