mod charts;
mod console;
mod tables;

pub use charts::{format_projection_chart, print_projection_chart};
pub use console::ConsoleSink;
pub use tables::{
    format_accumulation_summary, print_accumulation_summary,
    format_projection_table, print_projection_table,
    format_scenario_table, print_scenario_table,
    format_statistics_table, print_statistics_table,
    format_year,
};
