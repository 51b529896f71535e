use std::path::Path;

use crate::error::PopulationError;
use crate::models::ScenarioTable;

/// Read a scenario table from a TOML file. Each top-level table is one
/// scenario name mapped to its `growth_rate` and `capacity_ratio`.
pub fn read_scenarios_toml(path: impl AsRef<Path>) -> Result<ScenarioTable, PopulationError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let table: ScenarioTable = toml::from_str(&content)?;
    table.validate()?;
    Ok(table)
}

/// Write a scenario table to TOML.
pub fn write_scenarios_toml(
    table: &ScenarioTable,
    path: impl AsRef<Path>,
) -> Result<(), PopulationError> {
    let content = toml::to_string_pretty(table)
        .map_err(|e| PopulationError::Toml(e.to_string()))?;
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenarios.toml");
        let table = ScenarioTable::default();

        write_scenarios_toml(&table, &path).unwrap();
        let loaded = read_scenarios_toml(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_scenarios_toml_custom_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[\"Ultra Growth\"]\ngrowth_rate = 0.03\ncapacity_ratio = 2.0\n",
        )
        .unwrap();
        let loaded = read_scenarios_toml(&path).unwrap();
        let spec = loaded.resolve_spec("Ultra Growth").unwrap();
        assert_eq!(spec.growth_rate, 0.03);
        assert_eq!(spec.capacity_ratio, 2.0);
    }

    #[test]
    fn test_scenarios_toml_rejects_negative_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "[\"Shrinking\"]\ngrowth_rate = -0.01\ncapacity_ratio = 1.0\n",
        )
        .unwrap();
        assert!(read_scenarios_toml(&path).is_err());
    }
}
