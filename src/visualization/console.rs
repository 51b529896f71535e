use colored::Colorize;

use crate::analysis::{DisplaySink, ProjectionResult, ScenarioProjection};
use crate::models::YearPoint;
use crate::visualization::tables::{format_projection_table, format_scenario_table, format_year};

/// A display sink that renders results to stdout.
///
/// Year points print as one counter line each; projections and scenarios
/// print as full tables. With `every` greater than one, only every Nth
/// year point is printed, which keeps long accumulations readable.
pub struct ConsoleSink {
    name: String,
    every: usize,
    seen: usize,
}

impl ConsoleSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            every: 1,
            seen: 0,
        }
    }

    pub fn with_stride(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }
}

impl DisplaySink for ConsoleSink {
    fn on_year_point(&mut self, point: &YearPoint) {
        self.seen += 1;
        if (self.seen - 1) % self.every == 0 {
            println!(
                "  {:>9}  {:>18.0} births",
                format_year(point.year),
                point.cumulative_value
            );
        }
    }

    fn on_projection(&mut self, result: &ProjectionResult) {
        print!("{}", format_projection_table(&self.name, result));
    }

    fn on_scenario(&mut self, projection: &ScenarioProjection) {
        print!("{}", format_scenario_table(&self.name, projection));
    }

    fn on_total(&mut self, total_births: f64) {
        println!(
            "\n{}",
            format!("Total births: {total_births:.0}").bold().green()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_never_zero() {
        let sink = ConsoleSink::new("World").with_stride(0);
        assert_eq!(sink.every, 1);
    }

    #[test]
    fn test_sink_counts_points() {
        let mut sink = ConsoleSink::new("World").with_stride(1000);
        for year in 0..5 {
            sink.on_year_point(&YearPoint {
                year,
                cumulative_value: 100.0,
            });
        }
        assert_eq!(sink.seen, 5);
    }
}
