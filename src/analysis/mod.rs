mod accumulator;
mod fitter;
mod logistic;
mod orchestrator;
mod projection;
mod scenario;
mod statistics;

pub use accumulator::{
    accumulate, AccumulationResult, AccumulationStrategy, AccumulatorConfig, BirthsIter,
};
pub use fitter::{fit_initial_population, fit_logistic, FitBounds, FitReport};
pub use logistic::{logistic, LogisticParams};
pub use orchestrator::{DisplaySink, NullSink, Orchestrator, ProjectionMode, RunOutput};
pub use projection::{project_logistic, ProjectionOptions, ProjectionResult};
pub use scenario::{project_scenario, ScenarioProjection};
pub use statistics::{ConfidenceInterval, SeriesStatistics};
