mod catalog;
mod epoch;
mod scenario;
mod series;

pub use catalog::DatasetCatalog;
pub use epoch::{Epoch, EpochTable};
pub use scenario::{ScenarioParams, ScenarioSpec, ScenarioTable};
pub use series::{HistoricalSeries, VitalRates, YearPoint};
