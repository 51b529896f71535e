use serde::{Deserialize, Serialize};

use crate::error::PopulationError;

/// A historical time segment with its own baseline population and birth rate.
///
/// Years follow astronomical numbering: year 0 exists and BCE years are
/// negative (190,000 BCE is `-190000`). An epoch covers the half-open range
/// `[start_year, end_year)`, so a contiguous table counts every year exactly
/// once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epoch {
    pub start_year: i32,
    pub end_year: i32,
    /// Population at the start of the epoch.
    pub baseline_population: f64,
    /// Crude birth rate, births per 1000 people per year.
    pub birth_rate_per_1000: f64,
    /// Externally estimated total births across the epoch, used by the
    /// even-split accumulation strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub births_between: Option<f64>,
}

impl Epoch {
    /// Number of simulated years in this epoch.
    pub fn num_years(&self) -> i64 {
        (self.end_year as i64 - self.start_year as i64).max(0)
    }

    /// Validate a single epoch's bounds and magnitudes.
    pub fn validate(&self) -> Result<(), PopulationError> {
        if self.start_year >= self.end_year {
            return Err(PopulationError::InvalidEpochRange(format!(
                "epoch start {} is not before end {}",
                self.start_year, self.end_year
            )));
        }
        if !self.baseline_population.is_finite() || self.baseline_population < 0.0 {
            return Err(PopulationError::ValidationError(format!(
                "epoch {}..{}: baseline population must be finite and non-negative",
                self.start_year, self.end_year
            )));
        }
        if !self.birth_rate_per_1000.is_finite() || self.birth_rate_per_1000 < 0.0 {
            return Err(PopulationError::ValidationError(format!(
                "epoch {}..{}: birth rate must be finite and non-negative",
                self.start_year, self.end_year
            )));
        }
        if let Some(b) = self.births_between {
            if !b.is_finite() || b < 0.0 {
                return Err(PopulationError::ValidationError(format!(
                    "epoch {}..{}: births_between must be finite and non-negative",
                    self.start_year, self.end_year
                )));
            }
        }
        Ok(())
    }
}

/// An ordered, contiguous list of epochs tiling one simulated range.
///
/// Immutable once loaded; treated as read-only configuration for the
/// lifetime of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochTable {
    pub name: String,
    pub epochs: Vec<Epoch>,
}

impl EpochTable {
    pub fn new(name: impl Into<String>, epochs: Vec<Epoch>) -> Self {
        Self {
            name: name.into(),
            epochs,
        }
    }

    /// First simulated year, if any epochs exist.
    pub fn start_year(&self) -> Option<i32> {
        self.epochs.first().map(|e| e.start_year)
    }

    /// One past the last simulated year, if any epochs exist.
    pub fn end_year(&self) -> Option<i32> {
        self.epochs.last().map(|e| e.end_year)
    }

    /// Total number of simulated years across all epochs.
    pub fn num_years(&self) -> i64 {
        self.epochs.iter().map(|e| e.num_years()).sum()
    }

    /// Validate every epoch plus the table-level tiling invariant:
    /// epochs ordered by start year, non-overlapping, with no gaps.
    pub fn validate(&self) -> Result<(), PopulationError> {
        if self.epochs.is_empty() {
            return Err(PopulationError::InvalidEpochRange(
                "epoch table is empty".to_string(),
            ));
        }
        for epoch in &self.epochs {
            epoch.validate()?;
        }
        for pair in self.epochs.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start_year < prev.end_year {
                return Err(PopulationError::InvalidEpochRange(format!(
                    "epoch starting {} overlaps previous epoch ending {}",
                    next.start_year, prev.end_year
                )));
            }
            if next.start_year > prev.end_year {
                return Err(PopulationError::InvalidEpochRange(format!(
                    "gap between epoch ending {} and epoch starting {}",
                    prev.end_year, next.start_year
                )));
            }
        }
        Ok(())
    }
}
