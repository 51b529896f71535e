use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{
    AccumulationResult, ProjectionResult, ScenarioProjection, SeriesStatistics,
};

/// Format an accumulation run summary as a string.
pub fn format_accumulation_summary(name: &str, result: &AccumulationResult) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Cumulative Births: {name}").bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    if let (Some(first), Some(last)) = (result.series.first(), result.series.last()) {
        table.add_row(vec![
            Cell::new("First Year"),
            Cell::new(format_year(first.year)),
        ]);
        table.add_row(vec![
            Cell::new("Last Year"),
            Cell::new(format_year(last.year)),
        ]);
        table.add_row(vec![
            Cell::new("Years Simulated"),
            Cell::new(format!("{}", result.series.len())),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total Births"),
        Cell::new(format!("{:.0}", result.total_births)),
    ]);

    output.push_str(&format!("{table}"));
    output
}

/// Print an accumulation run summary.
pub fn print_accumulation_summary(name: &str, result: &AccumulationResult) {
    print!("{}", format_accumulation_summary(name, result));
}

/// Format a logistic projection table as a string.
pub fn format_projection_table(name: &str, result: &ProjectionResult) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Logistic Projection: {name}").bold().green()
    ));
    output.push_str(&format!(
        "{}\n",
        format!(
            "P0 = {:.2} | r = {:.4} | K = {:.2} | RSS = {:.4}",
            result.fitted_params.p0,
            result.fitted_params.r,
            result.fitted_params.k,
            result.rss
        )
        .dimmed()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Year", "Projected Population"]);

    for (year, pop) in result.future_years.iter().zip(&result.future_population) {
        table.add_row(vec![
            Cell::new(format!("{year}")),
            Cell::new(format!("{pop:.2}")),
        ]);
    }

    output.push_str(&format!("{table}"));
    if let Some(growth) = result.growth_percentage() {
        output.push_str(&format!(
            "\n{}\n",
            format!("Growth over horizon: {growth:+.1}%").bold()
        ));
    }
    output
}

/// Print a logistic projection table.
pub fn print_projection_table(name: &str, result: &ProjectionResult) {
    print!("{}", format_projection_table(name, result));
}

/// Format a scenario projection table as a string.
pub fn format_scenario_table(name: &str, projection: &ScenarioProjection) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Scenario '{}': {name}", projection.scenario)
            .bold()
            .green()
    ));
    output.push_str(&format!(
        "{}\n",
        format!(
            "r = {:.4} | K = {:.2} | fitted P0 = {:.2}",
            projection.result.fitted_params.r,
            projection.result.fitted_params.k,
            projection.result.fitted_params.p0
        )
        .dimmed()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Year", "Projected Population"]);

    for (year, pop) in projection
        .result
        .future_years
        .iter()
        .zip(&projection.result.future_population)
    {
        table.add_row(vec![
            Cell::new(format!("{year}")),
            Cell::new(format!("{pop:.2}")),
        ]);
    }

    output.push_str(&format!("{table}"));
    output.push_str(&format!(
        "\n{}\n",
        format!("Growth over horizon: {:+.1}%", projection.growth_percentage).bold()
    ));
    output
}

/// Print a scenario projection table.
pub fn print_scenario_table(name: &str, projection: &ScenarioProjection) {
    print!("{}", format_scenario_table(name, projection));
}

/// Format a series statistics table as a string.
pub fn format_statistics_table(name: &str, stats: &SeriesStatistics) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Series Statistics: {name}").bold().green()
    ));
    output.push_str(&format!(
        "{}\n",
        format!(
            "Confidence Level: {:.0}% | Intervals: {}",
            stats.annual_growth_rate.confidence_level * 100.0,
            stats.annual_growth_rate.sample_size
        )
        .dimmed()
    ));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Mean", "Std Error", "Lower CI", "Upper CI"]);

    let ci = &stats.annual_growth_rate;
    table.add_row(vec![
        Cell::new("Annual Growth Rate"),
        Cell::new(format!("{:.4}", ci.mean)),
        Cell::new(format!("{:.5}", ci.std_error)),
        Cell::new(format!("{:.4}", ci.lower)),
        Cell::new(format!("{:.4}", ci.upper)),
    ]);

    output.push_str(&format!("{table}"));
    output.push_str(&format!(
        "\nObserved {} to {}, last population {:.2}\n",
        format_year(stats.first_year),
        format_year(stats.last_year),
        stats.last_population
    ));
    output
}

/// Print a series statistics table.
pub fn print_statistics_table(name: &str, stats: &SeriesStatistics) {
    print!("{}", format_statistics_table(name, stats));
}

/// Render a possibly negative year in BCE/CE notation.
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BCE", -year)
    } else {
        format!("{year}")
    }
}
