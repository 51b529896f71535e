pub mod csv_io;
pub mod json_io;
pub mod toml_io;

pub use csv_io::{read_epochs_csv, read_series_csv, write_epochs_csv, write_series_csv};
pub use json_io::{read_catalog_json, write_catalog_json};
pub use toml_io::{read_scenarios_toml, write_scenarios_toml};
