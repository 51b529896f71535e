use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::fitter::{fit_logistic, FitBounds, FitReport};
use crate::analysis::logistic::LogisticParams;
use crate::error::PopulationError;
use crate::models::HistoricalSeries;

/// Controls the future year grid for projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    pub horizon_year: i32,
    pub step_years: u32,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            horizon_year: 2100,
            step_years: 5,
        }
    }
}

impl ProjectionOptions {
    /// Future grid from the last observed year to the horizon, stepping by
    /// `step_years`; the horizon year itself is always included.
    pub fn future_grid(&self, last_year: i32) -> Vec<i32> {
        let mut years: Vec<i32> = (last_year..=self.horizon_year)
            .step_by(self.step_years.max(1) as usize)
            .collect();
        if years.last() != Some(&self.horizon_year) {
            years.push(self.horizon_year);
        }
        years
    }
}

/// A fitted projection: the historical input, the future grid, and the
/// populations the fitted curve assigns to it. Owned by one request; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub historical: HistoricalSeries,
    pub future_years: Vec<i32>,
    pub future_population: Vec<f64>,
    pub fitted_params: LogisticParams,
    /// Residual sum of squares of the historical fit.
    pub rss: f64,
}

impl ProjectionResult {
    /// Projected population at the end of the horizon.
    pub fn endpoint(&self) -> Option<(i32, f64)> {
        match (self.future_years.last(), self.future_population.last()) {
            (Some(&y), Some(&p)) => Some((y, p)),
            _ => None,
        }
    }

    /// Percentage change from the last observation to the horizon endpoint.
    pub fn growth_percentage(&self) -> Option<f64> {
        let current = self.historical.last_population()?;
        let (_, projected) = self.endpoint()?;
        Some((projected - current) / current * 100.0)
    }
}

pub(crate) fn build_result(
    series: &HistoricalSeries,
    report: &FitReport,
    options: &ProjectionOptions,
) -> Result<ProjectionResult, PopulationError> {
    let last_year = series.last_year().ok_or_else(|| {
        PopulationError::InsufficientData("series has no observations".to_string())
    })?;
    let origin = series.years[0];
    let future_years = options.future_grid(last_year);
    let future_population = report.params.evaluate_years(&future_years, origin);
    Ok(ProjectionResult {
        historical: series.clone(),
        future_years,
        future_population,
        fitted_params: report.params,
        rss: report.rss,
    })
}

/// Fit the full logistic model to a series and project it forward.
pub fn project_logistic(
    series: &HistoricalSeries,
    bounds: &FitBounds,
    options: &ProjectionOptions,
) -> Result<ProjectionResult, PopulationError> {
    let report = fit_logistic(series, bounds)?;
    info!(
        p0 = report.params.p0,
        r = report.params.r,
        k = report.params.k,
        rss = report.rss,
        iterations = report.iterations,
        "logistic fit complete"
    );
    build_result(series, &report, options)
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
    fn test_future_grid_includes_horizon() {
        let options = ProjectionOptions::default();
        let grid = options.future_grid(2023);
        assert_eq!(grid[0], 2023);
        assert_eq!(grid[1], 2028);
        assert_eq!(*grid.last().unwrap(), 2100);
    }

    #[test]
    fn test_future_grid_aligned_horizon_not_duplicated() {
        let options = ProjectionOptions {
            horizon_year: 2050,
            step_years: 10,
        };
        let grid = options.future_grid(2020);
        assert_eq!(grid, vec![2020, 2030, 2040, 2050]);
    }

    #[test]
    fn test_project_logistic_brazil_endpoint() {
        let series = brazil();
        let result = project_logistic(
            &series,
            &FitBounds::default_for(&series),
            &ProjectionOptions::default(),
        )
        .unwrap();
        let (year, population) = result.endpoint().unwrap();
        assert_eq!(year, 2100);
        assert!(population > 215.3);
        assert!(population < 322.95);
        assert!(result.growth_percentage().unwrap() > 0.0);
    }

    #[test]
    fn test_projection_monotonic_future() {
        let series = brazil();
        let result = project_logistic(
            &series,
            &FitBounds::default_for(&series),
            &ProjectionOptions::default(),
        )
        .unwrap();
        for pair in result.future_population.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_projection_propagates_insufficient_data() {
        let series = HistoricalSeries::new(vec![2000, 2023], vec![174.4, 215.3]);
        let err = project_logistic(
            &series,
            &FitBounds::default_for(&series),
            &ProjectionOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PopulationError::InsufficientData(_)));
    }

    #[test]
    fn test_result_json_roundtrip() {
        let series = brazil();
        let result = project_logistic(
            &series,
            &FitBounds::default_for(&series),
            &ProjectionOptions::default(),
        )
        .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: ProjectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
