use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::accumulator::{accumulate, AccumulationResult, AccumulatorConfig, BirthsIter};
use crate::analysis::fitter::FitBounds;
use crate::analysis::projection::{project_logistic, ProjectionOptions, ProjectionResult};
use crate::analysis::scenario::{project_scenario, ScenarioProjection};
use crate::error::PopulationError;
use crate::models::{DatasetCatalog, ScenarioTable, YearPoint};

/// Which engine a request runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Epoch accumulation of cumulative births.
    Accumulate,
    /// Full three-parameter logistic fit and projection.
    Logistic,
    /// Scenario-constrained projection under a named preset.
    Scenario(String),
}

/// The output of one orchestrated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunOutput {
    Accumulation(AccumulationResult),
    Projection(ProjectionResult),
    Scenario(ScenarioProjection),
}

/// Receiver for results on their way to a presentation layer.
///
/// The core never paces, sleeps, or renders; a sink implementation decides
/// batching and animation on its own. All methods have empty defaults so a
/// sink implements only what it displays.
pub trait DisplaySink {
    fn on_year_point(&mut self, _point: &YearPoint) {}
    fn on_projection(&mut self, _result: &ProjectionResult) {}
    fn on_scenario(&mut self, _projection: &ScenarioProjection) {}
    fn on_total(&mut self, _total_births: f64) {}
}

/// A sink that discards everything; useful when only the returned value
/// matters.
pub struct NullSink;

impl DisplaySink for NullSink {}

/// Top-level entry point: selects a dataset and a mode, runs the matching
/// engine, and hands the series to the display sink.
///
/// Holds read-only configuration by value; each run operates on its own
/// copies, so concurrent orchestrators share no mutable state.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    catalog: DatasetCatalog,
    scenarios: ScenarioTable,
    accumulator: AccumulatorConfig,
    projection: ProjectionOptions,
}

impl Orchestrator {
    pub fn new(catalog: DatasetCatalog, scenarios: ScenarioTable) -> Self {
        Self {
            catalog,
            scenarios,
            accumulator: AccumulatorConfig::default(),
            projection: ProjectionOptions::default(),
        }
    }

    pub fn with_accumulator_config(mut self, config: AccumulatorConfig) -> Self {
        self.accumulator = config;
        self
    }

    pub fn with_projection_options(mut self, options: ProjectionOptions) -> Self {
        self.projection = options;
        self
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    pub fn scenarios(&self) -> &ScenarioTable {
        &self.scenarios
    }

    /// Lazy accumulation stream for a dataset, for sinks that want to pace
    /// the series themselves.
    pub fn accumulation_stream(&self, dataset_id: &str) -> Result<BirthsIter, PopulationError> {
        let table = self.catalog.epoch_table(dataset_id)?;
        BirthsIter::new(table, self.accumulator)
    }

    /// Run one request and feed the sink.
    pub fn run(
        &self,
        dataset_id: &str,
        mode: &ProjectionMode,
        sink: &mut dyn DisplaySink,
    ) -> Result<RunOutput, PopulationError> {
        info!(dataset = dataset_id, ?mode, "running projection request");
        match mode {
            ProjectionMode::Accumulate => {
                let table = self.catalog.epoch_table(dataset_id)?;
                let result = accumulate(table, self.accumulator)?;
                for point in &result.series {
                    sink.on_year_point(point);
                }
                sink.on_total(result.total_births);
                Ok(RunOutput::Accumulation(result))
            }
            ProjectionMode::Logistic => {
                let series = self.catalog.series(dataset_id)?;
                let bounds = FitBounds::default_for(series);
                let result = project_logistic(series, &bounds, &self.projection)?;
                sink.on_projection(&result);
                Ok(RunOutput::Projection(result))
            }
            ProjectionMode::Scenario(name) => {
                let series = self.catalog.series(dataset_id)?;
                let projection =
                    project_scenario(series, name, &self.scenarios, &self.projection)?;
                sink.on_scenario(&projection);
                Ok(RunOutput::Scenario(projection))
            }
        }
    }
}
