use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::fitter::fit_initial_population;
use crate::analysis::projection::{build_result, ProjectionOptions, ProjectionResult};
use crate::error::PopulationError;
use crate::models::{HistoricalSeries, ScenarioTable};

/// A projection under a named scenario, with its derived growth metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: String,
    pub result: ProjectionResult,
    /// Percentage change from the last observation to the horizon endpoint.
    pub growth_percentage: f64,
}

/// Resolve a named scenario against a series and project it forward.
///
/// The scenario fixes `r` and `K`; only the initial population is fitted.
/// Stateless: a pure function of its inputs.
pub fn project_scenario(
    series: &HistoricalSeries,
    scenario_name: &str,
    table: &ScenarioTable,
    options: &ProjectionOptions,
) -> Result<ScenarioProjection, PopulationError> {
    let params = table.resolve(scenario_name, series)?;
    params.validate(series)?;

    let report = fit_initial_population(series, &params)?;
    info!(
        scenario = scenario_name,
        p0 = report.params.p0,
        r = params.growth_rate,
        k = params.carrying_capacity,
        "scenario fit complete"
    );

    let result = build_result(series, &report, options)?;
    let growth_percentage = result.growth_percentage().ok_or_else(|| {
        PopulationError::InsufficientData("series has no observations".to_string())
    })?;

    Ok(ScenarioProjection {
        scenario: scenario_name.to_string(),
        result,
        growth_percentage,
    })
}
