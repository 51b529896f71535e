use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PopulationError;
use crate::models::{Epoch, EpochTable, YearPoint};

/// How yearly births are derived within an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationStrategy {
    /// Recompute births each year from the rolling population and the
    /// epoch's crude birth rate.
    RateBased,
    /// Spread the epoch's externally estimated `births_between` total evenly
    /// across its years.
    FixedTotalEvenSplit,
}

/// Configuration for one accumulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorConfig {
    pub strategy: AccumulationStrategy,
    /// Fraction of each year's births reinvested into the rolling population
    /// base, in `[0, 1]`.
    pub dampening: f64,
    /// When `false` (the source data's convention), each epoch boundary
    /// resets the rolling population to the next epoch's declared baseline.
    /// When `true`, the simulated end-of-epoch value carries forward instead.
    pub carry_forward: bool,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            strategy: AccumulationStrategy::RateBased,
            dampening: 0.5,
            carry_forward: false,
        }
    }
}

impl AccumulatorConfig {
    pub fn validate(&self) -> Result<(), PopulationError> {
        if !self.dampening.is_finite() || !(0.0..=1.0).contains(&self.dampening) {
            return Err(PopulationError::ValidationError(format!(
                "dampening must lie in [0, 1], got {}",
                self.dampening
            )));
        }
        Ok(())
    }
}

/// Result of draining a full accumulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulationResult {
    pub series: Vec<YearPoint>,
    pub total_births: f64,
}

/// Pull-based iterator over the cumulative-births series, one `YearPoint`
/// per simulated year.
///
/// Each epoch covers the half-open range `[start_year, end_year)`. The
/// iterator owns a copy of its inputs, so concurrent runs over different
/// datasets share nothing; pacing (animation, batching) is entirely the
/// caller's concern. Restart by constructing a new iterator.
#[derive(Debug, Clone)]
pub struct BirthsIter {
    epochs: Vec<Epoch>,
    config: AccumulatorConfig,
    epoch_idx: usize,
    year: i32,
    rolling_population: f64,
    total: f64,
}

impl BirthsIter {
    /// Build an iterator over a validated epoch table.
    pub fn new(table: &EpochTable, config: AccumulatorConfig) -> Result<Self, PopulationError> {
        table.validate()?;
        config.validate()?;
        if config.strategy == AccumulationStrategy::FixedTotalEvenSplit {
            for epoch in &table.epochs {
                if epoch.births_between.is_none() {
                    return Err(PopulationError::ValidationError(format!(
                        "epoch {}..{} has no births_between total for the even-split strategy",
                        epoch.start_year, epoch.end_year
                    )));
                }
            }
        }
        let first = &table.epochs[0];
        Ok(Self {
            epochs: table.epochs.clone(),
            config,
            epoch_idx: 0,
            year: first.start_year,
            rolling_population: first.baseline_population,
            total: 0.0,
        })
    }

    /// Cumulative total emitted so far.
    pub fn total_births(&self) -> f64 {
        self.total
    }
}

impl Iterator for BirthsIter {
    type Item = YearPoint;

    fn next(&mut self) -> Option<YearPoint> {
        let epoch = self.epochs.get(self.epoch_idx)?;

        let births = match self.config.strategy {
            AccumulationStrategy::RateBased => {
                self.rolling_population * epoch.birth_rate_per_1000 / 1000.0
            }
            // Presence checked at construction.
            AccumulationStrategy::FixedTotalEvenSplit => {
                epoch.births_between.unwrap_or(0.0) / epoch.num_years() as f64
            }
        };
        self.total += births;
        if self.config.strategy == AccumulationStrategy::RateBased {
            self.rolling_population += births * self.config.dampening;
        }

        let point = YearPoint {
            year: self.year,
            cumulative_value: self.total,
        };

        self.year += 1;
        if self.year >= epoch.end_year {
            self.epoch_idx += 1;
            if let Some(next) = self.epochs.get(self.epoch_idx) {
                self.year = next.start_year;
                if !self.config.carry_forward {
                    self.rolling_population = next.baseline_population;
                }
            }
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining: i64 = self
            .epochs
            .iter()
            .skip(self.epoch_idx)
            .map(|e| e.num_years())
            .sum::<i64>()
            - (self.year as i64 - self.epochs.get(self.epoch_idx).map_or(self.year as i64, |e| e.start_year as i64));
        let remaining = remaining.max(0) as usize;
        (remaining, Some(remaining))
    }
}

/// Drain a full accumulation run into a series and its final total.
pub fn accumulate(
    table: &EpochTable,
    config: AccumulatorConfig,
) -> Result<AccumulationResult, PopulationError> {
    let mut iter = BirthsIter::new(table, config)?;
    let mut series = Vec::with_capacity(iter.size_hint().0);
    for point in &mut iter {
        series.push(point);
    }
    let total_births = iter.total_births();
    debug!(
        dataset = %table.name,
        years = series.len(),
        total_births,
        "accumulation complete"
    );
    Ok(AccumulationResult {
        series,
        total_births,
    })
}
