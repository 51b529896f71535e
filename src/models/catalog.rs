use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PopulationError;
use crate::models::{Epoch, EpochTable, HistoricalSeries, VitalRates};

/// Read-only mapping from dataset id to its input data.
///
/// A dataset id resolves to a sparse historical series (projection modes),
/// an epoch table (accumulation mode), or both. Loaded once from
/// configuration and referenced by value afterwards; the engines never
/// mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetCatalog {
    #[serde(default)]
    pub series: BTreeMap<String, HistoricalSeries>,
    #[serde(default)]
    pub epochs: BTreeMap<String, EpochTable>,
}

impl DatasetCatalog {
    /// Look up the historical series for a dataset id.
    pub fn series(&self, id: &str) -> Result<&HistoricalSeries, PopulationError> {
        self.series
            .get(id)
            .ok_or_else(|| PopulationError::UnknownDataset(format!("no historical series for '{id}'")))
    }

    /// Look up the epoch table for a dataset id.
    pub fn epoch_table(&self, id: &str) -> Result<&EpochTable, PopulationError> {
        self.epochs
            .get(id)
            .ok_or_else(|| PopulationError::UnknownDataset(format!("no epoch table for '{id}'")))
    }

    /// All dataset ids carrying a historical series.
    pub fn series_ids(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    /// All dataset ids carrying an epoch table.
    pub fn epoch_ids(&self) -> Vec<&str> {
        self.epochs.keys().map(String::as_str).collect()
    }

    /// Validate every series and epoch table in the catalog.
    pub fn validate(&self) -> Result<(), PopulationError> {
        for (id, series) in &self.series {
            series.validate().map_err(|e| {
                PopulationError::ValidationError(format!("dataset '{id}': {e}"))
            })?;
        }
        for (id, table) in &self.epochs {
            table.validate().map_err(|e| {
                PopulationError::InvalidEpochRange(format!("dataset '{id}': {e}"))
            })?;
        }
        Ok(())
    }

    /// The bundled reference data: national census series (millions) with
    /// vital rates, plus the world epoch table used for the
    /// people-ever-lived estimate.
    pub fn builtin() -> Self {
        let census_years = vec![1800, 1850, 1900, 1950, 2000, 2023];
        let country = |population: Vec<f64>, birth: f64, death: f64, migration: f64| {
            HistoricalSeries {
                years: census_years.clone(),
                population,
                vital_rates: Some(VitalRates {
                    birth_rate: birth,
                    death_rate: death,
                    migration_rate: migration,
                }),
            }
        };

        let mut series = BTreeMap::new();
        series.insert(
            "Brazil".to_string(),
            country(vec![4.5, 9.1, 17.4, 51.9, 174.4, 215.3], 14.2, 6.7, 0.3),
        );
        series.insert(
            "Poland".to_string(),
            country(vec![7.3, 9.2, 20.0, 25.0, 38.6, 38.0], 9.5, 10.7, -0.4),
        );
        series.insert(
            "Sweden".to_string(),
            country(vec![2.3, 3.5, 5.1, 7.0, 8.9, 10.6], 11.4, 9.3, 5.3),
        );
        series.insert(
            "Italy".to_string(),
            country(vec![17.3, 24.7, 33.2, 47.1, 57.3, 59.0], 7.6, 10.7, 2.2),
        );
        series.insert(
            "USA".to_string(),
            country(vec![5.3, 23.1, 76.2, 151.3, 282.2, 336.0], 12.4, 8.4, 3.0),
        );
        series.insert(
            "China".to_string(),
            country(
                vec![381.0, 430.0, 400.0, 544.0, 1267.4, 1412.0],
                10.5,
                7.3,
                -0.3,
            ),
        );
        series.insert(
            "India".to_string(),
            country(
                vec![169.0, 208.0, 238.0, 376.3, 1053.6, 1420.0],
                17.4,
                7.3,
                -0.1,
            ),
        );

        let mut epochs = BTreeMap::new();
        epochs.insert("World".to_string(), world_epoch_table());

        Self { series, epochs }
    }
}

/// Global epoch table, from the emergence of Homo sapiens through the 2050
/// projection. Populations are absolute head counts; `births_between` holds
/// the published per-epoch birth estimates consumed by the even-split
/// strategy.
fn world_epoch_table() -> EpochTable {
    let epoch = |start: i32, end: i32, population: f64, rate: f64, births: f64| Epoch {
        start_year: start,
        end_year: end,
        baseline_population: population,
        birth_rate_per_1000: rate,
        births_between: Some(births),
    };

    EpochTable::new(
        "World",
        vec![
            epoch(-190_000, -50_000, 2.0, 80.0, 7_856_100_000.0),
            epoch(-50_000, -8_000, 2_000_000.0, 80.0, 1_137_789_769.0),
            epoch(-8_000, 1, 5_000_000.0, 80.0, 46_025_332_354.0),
            epoch(1, 1200, 300_000_000.0, 80.0, 26_591_343_000.0),
            epoch(1200, 1650, 450_000_000.0, 60.0, 12_782_002_453.0),
            epoch(1650, 1750, 500_000_000.0, 60.0, 3_171_931_513.0),
            epoch(1750, 1850, 795_000_000.0, 50.0, 4_046_240_009.0),
            epoch(1850, 1900, 1_265_000_000.0, 40.0, 2_900_237_856.0),
            epoch(1900, 1950, 1_656_000_000.0, 31.0, 3_390_198_215.0),
            epoch(1950, 2000, 2_499_000_000.0, 22.0, 6_064_994_884.0),
            epoch(2000, 2023, 6_149_000_000.0, 17.0, 1_690_275_115.0),
            epoch(2023, 2024, 8_050_000_000.0, 17.0, 135_000_000.0),
            epoch(2024, 2035, 8_100_000_000.0, 16.0, 900_000_000.0),
            epoch(2035, 2050, 9_000_000_000.0, 14.0, 966_000_000.0),
        ],
    )
}
