pub mod analysis;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::{Orchestrator, ProjectionMode, RunOutput};
pub use error::PopulationError;
pub use models::{DatasetCatalog, EpochTable, HistoricalSeries, ScenarioTable};
