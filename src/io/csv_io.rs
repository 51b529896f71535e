use std::path::Path;

use crate::error::PopulationError;
use crate::models::{Epoch, EpochTable, HistoricalSeries};

/// CSV row structure for one historical observation.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct SeriesRow {
    year: i32,
    population: f64,
}

/// CSV row structure for one epoch.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct EpochRow {
    start_year: i32,
    end_year: i32,
    baseline_population: f64,
    birth_rate_per_1000: f64,
    births_between: Option<f64>,
}

/// Read a historical series from a CSV file with `year,population` columns.
pub fn read_series_csv(path: impl AsRef<Path>) -> Result<HistoricalSeries, PopulationError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut years = Vec::new();
    let mut population = Vec::new();
    for result in rdr.deserialize() {
        let row: SeriesRow = result?;
        years.push(row.year);
        population.push(row.population);
    }

    let series = HistoricalSeries::new(years, population);
    series.validate()?;
    Ok(series)
}

/// Write a historical series to CSV.
pub fn write_series_csv(
    series: &HistoricalSeries,
    path: impl AsRef<Path>,
) -> Result<(), PopulationError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for (&year, &population) in series.years.iter().zip(&series.population) {
        wtr.serialize(SeriesRow { year, population })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read an epoch table from a CSV file. The table name is taken from the
/// file stem.
pub fn read_epochs_csv(path: impl AsRef<Path>) -> Result<EpochTable, PopulationError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("epochs")
        .to_string();

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut epochs = Vec::new();
    for result in rdr.deserialize() {
        let row: EpochRow = result?;
        epochs.push(Epoch {
            start_year: row.start_year,
            end_year: row.end_year,
            baseline_population: row.baseline_population,
            birth_rate_per_1000: row.birth_rate_per_1000,
            births_between: row.births_between,
        });
    }

    let table = EpochTable::new(name, epochs);
    table.validate()?;
    Ok(table)
}

/// Write an epoch table to CSV.
pub fn write_epochs_csv(
    table: &EpochTable,
    path: impl AsRef<Path>,
) -> Result<(), PopulationError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for epoch in &table.epochs {
        wtr.serialize(EpochRow {
            start_year: epoch.start_year,
            end_year: epoch.end_year,
            baseline_population: epoch.baseline_population,
            birth_rate_per_1000: epoch.birth_rate_per_1000,
            births_between: epoch.births_between,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
