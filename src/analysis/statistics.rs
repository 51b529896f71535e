use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::PopulationError;
use crate::models::HistoricalSeries;

/// Confidence interval for a metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub std_error: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
    pub sample_size: usize,
}

/// Descriptive statistics of a historical series, for display alongside a
/// projection. Contextual only: the fitter never consumes these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesStatistics {
    /// Mean exponential growth rate per year between consecutive
    /// observations, with a Student-t interval.
    pub annual_growth_rate: ConfidenceInterval,
    pub first_year: i32,
    pub last_year: i32,
    pub last_population: f64,
}

impl SeriesStatistics {
    /// Compute interval growth-rate statistics at a confidence level
    /// (e.g. 0.95). Needs at least three observations (two intervals).
    pub fn compute(
        series: &HistoricalSeries,
        confidence: f64,
    ) -> Result<Self, PopulationError> {
        series.validate()?;
        if series.len() < 3 {
            return Err(PopulationError::InsufficientData(
                "need at least 3 observations for growth-rate statistics".to_string(),
            ));
        }

        // Per-interval exponential growth rate: ln(P1/P0) / years.
        let mut rates = Vec::with_capacity(series.len() - 1);
        for i in 1..series.len() {
            let years = (series.years[i] - series.years[i - 1]) as f64;
            let rate = (series.population[i] / series.population[i - 1]).ln() / years;
            rates.push(rate);
        }

        Ok(Self {
            annual_growth_rate: compute_ci(&rates, confidence)?,
            first_year: series.years[0],
            last_year: *series.years.last().unwrap(),
            last_population: *series.population.last().unwrap(),
        })
    }
}

/// Compute a confidence interval from a set of values.
fn compute_ci(values: &[f64], confidence: f64) -> Result<ConfidenceInterval, PopulationError> {
    let n = values.len();
    if n < 2 {
        return Err(PopulationError::InsufficientData(
            "need at least 2 observations".to_string(),
        ));
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_error = variance.sqrt() / (n as f64).sqrt();

    let df = (n - 1) as f64;
    let alpha = 1.0 - confidence;
    let t_dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| PopulationError::ValidationError(e.to_string()))?;
    let t_value = t_dist.inverse_cdf(1.0 - alpha / 2.0);

    let margin = t_value * std_error;
    Ok(ConfidenceInterval {
        mean,
        std_error,
        lower: mean - margin,
        upper: mean + margin,
        confidence_level: confidence,
        sample_size: n,
    })
}
