use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use population_analyzer::{
    analysis::{
        AccumulationStrategy, AccumulatorConfig, Orchestrator, ProjectionMode, ProjectionOptions,
        SeriesStatistics,
    },
    io,
    models::{DatasetCatalog, ScenarioTable},
    visualization::{
        print_accumulation_summary, print_projection_chart, print_statistics_table, ConsoleSink,
    },
    RunOutput,
};

#[derive(Parser)]
#[command(
    name = "population-analyzer",
    about = "Population analyzer - cumulative-birth accumulation and logistic projection",
    version,
    author
)]
struct Cli {
    /// Path to a JSON dataset catalog (defaults to the built-in datasets)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Path to a TOML scenario table (defaults to the built-in presets)
    #[arg(long, global = true)]
    scenarios: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    /// Yearly births from the epoch birth rate
    RateBased,
    /// Spread a declared epoch total evenly across its years
    EvenSplit,
}

impl From<StrategyArg> for AccumulationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::RateBased => AccumulationStrategy::RateBased,
            StrategyArg::EvenSplit => AccumulationStrategy::FixedTotalEvenSplit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Accumulate cumulative births across an epoch table
    Accumulate {
        /// Dataset id with an epoch table
        #[arg(short, long, default_value = "World")]
        dataset: String,

        /// Accumulation strategy
        #[arg(short, long, value_enum, default_value = "rate-based")]
        strategy: StrategyArg,

        /// Dampening factor applied to births feeding the rolling population
        #[arg(long, default_value = "0.5")]
        dampening: f64,

        /// Carry the rolling population across epoch boundaries
        #[arg(long)]
        carry_forward: bool,

        /// One-off adjustment added to the accumulated total
        #[arg(long)]
        adjustment: Option<f64>,

        /// Print every Nth year point (1 prints all)
        #[arg(long, default_value = "1000")]
        stride: usize,
    },

    /// Fit a logistic curve to a historical series and project it forward
    Project {
        /// Dataset id with a historical series
        #[arg(short, long, default_value = "Brazil")]
        dataset: String,

        /// Read the series from a CSV file instead of the catalog
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Final projected year
        #[arg(long, default_value = "2100")]
        horizon: i32,

        /// Year spacing of the projected grid
        #[arg(long, default_value = "5")]
        step: u32,

        /// Show the trajectory chart
        #[arg(long)]
        chart: bool,
    },

    /// Project under a named scenario preset
    Scenario {
        /// Dataset id with a historical series
        #[arg(short, long, default_value = "Brazil")]
        dataset: String,

        /// Scenario name
        #[arg(short, long, default_value = "Moderate Growth")]
        name: String,

        /// Final projected year
        #[arg(long, default_value = "2100")]
        horizon: i32,

        /// Year spacing of the projected grid
        #[arg(long, default_value = "5")]
        step: u32,
    },

    /// Display growth-rate statistics for a historical series
    Analyze {
        /// Dataset id with a historical series
        #[arg(short, long, default_value = "Brazil")]
        dataset: String,

        /// Confidence level for the growth-rate interval (0.0-1.0)
        #[arg(short, long, default_value = "0.95")]
        confidence: f64,
    },

    /// List available datasets and scenarios
    List,
}

fn load_catalog(path: &Option<PathBuf>) -> Result<DatasetCatalog> {
    match path {
        Some(p) => Ok(io::read_catalog_json(p)?),
        None => Ok(DatasetCatalog::builtin()),
    }
}

fn load_scenarios(path: &Option<PathBuf>) -> Result<ScenarioTable> {
    match path {
        Some(p) => Ok(io::read_scenarios_toml(p)?),
        None => Ok(ScenarioTable::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(&cli.catalog)?;
    let scenarios = load_scenarios(&cli.scenarios)?;

    match cli.command {
        Commands::Accumulate {
            dataset,
            strategy,
            dampening,
            carry_forward,
            adjustment,
            stride,
        } => {
            let config = AccumulatorConfig {
                strategy: strategy.into(),
                dampening,
                carry_forward,
            };
            config.validate()?;

            println!(
                "\n{}",
                format!("Accumulating births: {dataset}").bold().cyan()
            );

            let orchestrator = Orchestrator::new(catalog, scenarios).with_accumulator_config(config);
            let mut sink = ConsoleSink::new(&dataset).with_stride(stride);
            let output = orchestrator.run(&dataset, &ProjectionMode::Accumulate, &mut sink)?;

            if let RunOutput::Accumulation(result) = output {
                print_accumulation_summary(&dataset, &result);
                if let Some(adjustment) = adjustment {
                    println!(
                        "\n  Adjusted total: {:.0}",
                        result.total_births + adjustment
                    );
                }
            }
        }

        Commands::Project {
            dataset,
            input,
            horizon,
            step,
            chart,
        } => {
            let options = ProjectionOptions {
                horizon_year: horizon,
                step_years: step,
            };

            let (label, catalog) = match input {
                Some(path) => {
                    let series = io::read_series_csv(&path)?;
                    let label = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("input")
                        .to_string();
                    let mut catalog = DatasetCatalog::default();
                    catalog.series.insert(label.clone(), series);
                    (label, catalog)
                }
                None => (dataset, catalog),
            };

            println!(
                "\n{}",
                format!("Logistic projection: {label}").bold().cyan()
            );

            let orchestrator =
                Orchestrator::new(catalog, scenarios).with_projection_options(options);
            let mut sink = ConsoleSink::new(&label);
            let output = orchestrator.run(&label, &ProjectionMode::Logistic, &mut sink)?;

            if chart {
                if let RunOutput::Projection(result) = output {
                    print_projection_chart(&result);
                }
            }
        }

        Commands::Scenario {
            dataset,
            name,
            horizon,
            step,
        } => {
            let options = ProjectionOptions {
                horizon_year: horizon,
                step_years: step,
            };

            println!(
                "\n{}",
                format!("Scenario projection: {dataset}").bold().cyan()
            );

            let orchestrator =
                Orchestrator::new(catalog, scenarios).with_projection_options(options);
            let mut sink = ConsoleSink::new(&dataset);
            orchestrator.run(&dataset, &ProjectionMode::Scenario(name), &mut sink)?;
        }

        Commands::Analyze {
            dataset,
            confidence,
        } => {
            let series = catalog.series(&dataset)?;
            println!(
                "\n{}",
                format!("Series analysis: {dataset}").bold().cyan()
            );
            let stats = SeriesStatistics::compute(series, confidence)?;
            print_statistics_table(&dataset, &stats);
        }

        Commands::List => {
            println!("\n{}", "Historical series".bold().cyan());
            for id in catalog.series_ids() {
                let series = catalog.series(id)?;
                println!(
                    "  {id:<12} {} observations, {} to {}",
                    series.len(),
                    series.first_year().unwrap_or(0),
                    series.last_year().unwrap_or(0)
                );
            }

            println!("\n{}", "Epoch tables".bold().cyan());
            for id in catalog.epoch_ids() {
                let table = catalog.epoch_table(id)?;
                println!(
                    "  {id:<12} {} epochs, {} to {}",
                    table.epochs.len(),
                    table.start_year().unwrap_or(0),
                    table.end_year().unwrap_or(0)
                );
            }

            println!("\n{}", "Scenarios".bold().cyan());
            for name in scenarios.names() {
                let spec = scenarios.resolve_spec(name)?;
                println!(
                    "  {name:<16} r = {:.3}, capacity ratio = {:.1}",
                    spec.growth_rate, spec.capacity_ratio
                );
            }
        }
    }

    Ok(())
}
