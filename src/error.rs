use thiserror::Error;

/// Errors that can occur in population analysis.
#[derive(Error, Debug)]
pub enum PopulationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid epoch range: {0}")]
    InvalidEpochRange(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Fit did not converge: {0}")]
    FitDidNotConverge(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Degenerate carrying capacity: {0}")]
    DegenerateCapacity(String),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}

impl From<toml::de::Error> for PopulationError {
    fn from(e: toml::de::Error) -> Self {
        PopulationError::Toml(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PopulationError::from(io_err);
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_invalid_epoch_range_display() {
        let err = PopulationError::InvalidEpochRange("gap between 2022 and 2024".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid epoch range: gap between 2022 and 2024"
        );
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = PopulationError::InsufficientData("need 3 samples".to_string());
        assert_eq!(err.to_string(), "Insufficient data: need 3 samples");
    }

    #[test]
    fn test_unknown_scenario_display() {
        let err = PopulationError::UnknownScenario("Ultra Growth".to_string());
        assert_eq!(err.to_string(), "Unknown scenario: Ultra Growth");
    }

    #[test]
    fn test_degenerate_capacity_display() {
        let err = PopulationError::DegenerateCapacity("K=100 below last observation".to_string());
        assert!(err.to_string().contains("Degenerate carrying capacity"));
    }

    #[test]
    fn test_json_error_from_conversion() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json{{{");
        let json_err = result.unwrap_err();
        let pop_err: PopulationError = json_err.into();
        assert!(matches!(pop_err, PopulationError::Json(_)));
        assert!(pop_err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_is_debug() {
        let err = PopulationError::ParseError("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ParseError"));
    }
}
