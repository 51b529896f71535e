use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::PopulationError;
use crate::models::DatasetCatalog;

/// Read a dataset catalog (historical series plus epoch tables) from JSON.
pub fn read_catalog_json(path: impl AsRef<Path>) -> Result<DatasetCatalog, PopulationError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let catalog: DatasetCatalog = serde_json::from_reader(reader)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Write a dataset catalog to pretty-printed JSON.
pub fn write_catalog_json(
    catalog: &DatasetCatalog,
    path: impl AsRef<Path>,
) -> Result<(), PopulationError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, catalog)?;
    writer.flush()?;
    Ok(())
}
