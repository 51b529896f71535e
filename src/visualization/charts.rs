use colored::Colorize;

use crate::analysis::ProjectionResult;
use crate::visualization::tables::format_year;

/// Format a text-based bar chart of historical and projected population as a
/// string. Historical bars render solid, projected bars hollow.
pub fn format_projection_chart(result: &ProjectionResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Population Trajectory".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let historical: Vec<(i32, f64, bool)> = result
        .historical
        .years
        .iter()
        .zip(&result.historical.population)
        .map(|(&y, &p)| (y, p, true))
        .collect();
    let future: Vec<(i32, f64, bool)> = result
        .future_years
        .iter()
        .zip(&result.future_population)
        .map(|(&y, &p)| (y, p, false))
        .collect();

    let rows: Vec<(i32, f64, bool)> = historical.into_iter().chain(future).collect();
    if rows.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_pop = rows.iter().map(|r| r.1).fold(0.0f64, f64::max);
    let bar_width = 40;

    output.push_str(&format!("  {:>9}  {:>12}  Population\n", "Year", "Value"));
    output.push_str(&format!("  {}\n", "-".repeat(66)));

    for (year, pop, observed) in &rows {
        let bar_len = if max_pop > 0.0 {
            ((pop / max_pop) * bar_width as f64).round() as usize
        } else {
            0
        };
        let bar = if *observed {
            "\u{2588}".repeat(bar_len)
        } else {
            "\u{2591}".repeat(bar_len)
        };
        output.push_str(&format!(
            "  {:>9}  {:>12.2}  {}\n",
            format_year(*year),
            pop,
            bar
        ));
    }

    output.push_str(&format!(
        "\n  {} observed   {} projected\n",
        "\u{2588}".to_string().bold(),
        "\u{2591}"
    ));
    output
}

/// Print the population trajectory chart.
pub fn print_projection_chart(result: &ProjectionResult) {
    print!("{}", format_projection_chart(result));
}
