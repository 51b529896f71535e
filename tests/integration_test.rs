use population_analyzer::{
    analysis::{
        accumulate, fit_logistic, project_scenario, AccumulationStrategy, AccumulatorConfig,
        DisplaySink, FitBounds, NullSink, Orchestrator, ProjectionMode, ProjectionOptions,
        RunOutput, SeriesStatistics,
    },
    error::PopulationError,
    io,
    models::{DatasetCatalog, Epoch, EpochTable, HistoricalSeries, ScenarioTable, YearPoint},
};

fn brazil() -> HistoricalSeries {
    DatasetCatalog::builtin().series("Brazil").unwrap().clone()
}

#[test]
fn test_full_logistic_pipeline() {
    let orchestrator = Orchestrator::new(DatasetCatalog::builtin(), ScenarioTable::default());

    let mut sink = NullSink;
    let output = orchestrator
        .run("Brazil", &ProjectionMode::Logistic, &mut sink)
        .unwrap();

    let RunOutput::Projection(result) = output else {
        panic!("expected a projection output");
    };

    // The unconstrained fit keeps the curve above the last observation and
    // below the capacity bound of 1.5x the historical maximum.
    let (year, endpoint) = result.endpoint().unwrap();
    assert_eq!(year, 2100);
    assert!(endpoint > 215.3);
    assert!(endpoint <= 1.5 * 215.3 + 1e-9);
    assert!(result.rss.is_finite() && result.rss >= 0.0);
}

#[test]
fn test_scenario_pipeline_moderate_growth() {
    let series = brazil();
    let table = ScenarioTable::default();
    let projection = project_scenario(
        &series,
        "Moderate Growth",
        &table,
        &ProjectionOptions::default(),
    )
    .unwrap();

    // K equals the historical maximum; the curve never exceeds it.
    for &pop in &projection.result.future_population {
        assert!(pop <= 215.3 + 1e-6);
    }
    assert!(projection.growth_percentage.is_finite());
}

#[test]
fn test_scenario_pipeline_low_growth_degenerate() {
    let series = brazil();
    let table = ScenarioTable::default();
    let err = project_scenario(&series, "Low Growth", &table, &ProjectionOptions::default())
        .unwrap_err();
    assert!(matches!(err, PopulationError::DegenerateCapacity(_)));
}

#[test]
fn test_accumulation_world_run() {
    let catalog = DatasetCatalog::builtin();
    let table = catalog.epoch_table("World").unwrap();
    let result = accumulate(table, AccumulatorConfig::default()).unwrap();

    assert_eq!(result.series.len(), table.num_years() as usize);

    // Cumulative births never decrease.
    for pair in result.series.windows(2) {
        assert!(pair[1].cumulative_value >= pair[0].cumulative_value);
    }
    assert!(result.total_births > 0.0);
    assert_eq!(
        result.series.last().unwrap().cumulative_value,
        result.total_births
    );
}

#[test]
fn test_accumulation_even_split_matches_declared_totals() {
    let catalog = DatasetCatalog::builtin();
    let table = catalog.epoch_table("World").unwrap();
    let config = AccumulatorConfig {
        strategy: AccumulationStrategy::FixedTotalEvenSplit,
        ..AccumulatorConfig::default()
    };
    let result = accumulate(table, config).unwrap();

    let declared: f64 = table.epochs.iter().filter_map(|e| e.births_between).sum();
    let relative = (result.total_births - declared).abs() / declared;
    assert!(relative < 1e-6, "relative error {relative}");
}

#[test]
fn test_orchestrator_feeds_sink_in_order() {
    struct OrderSink {
        last_year: Option<i32>,
        points: usize,
        total: Option<f64>,
    }

    impl DisplaySink for OrderSink {
        fn on_year_point(&mut self, point: &YearPoint) {
            if let Some(last) = self.last_year {
                assert_eq!(point.year, last + 1);
            }
            self.last_year = Some(point.year);
            self.points += 1;
        }

        fn on_total(&mut self, total_births: f64) {
            self.total = Some(total_births);
        }
    }

    let orchestrator = Orchestrator::new(DatasetCatalog::builtin(), ScenarioTable::default());
    let mut sink = OrderSink {
        last_year: None,
        points: 0,
        total: None,
    };
    let output = orchestrator
        .run("World", &ProjectionMode::Accumulate, &mut sink)
        .unwrap();

    let RunOutput::Accumulation(result) = output else {
        panic!("expected an accumulation output");
    };
    assert_eq!(sink.points, result.series.len());
    assert_eq!(sink.total, Some(result.total_births));
}

#[test]
fn test_unknown_dataset_and_scenario_errors() {
    let orchestrator = Orchestrator::new(DatasetCatalog::builtin(), ScenarioTable::default());
    let mut sink = NullSink;

    let err = orchestrator
        .run("Atlantis", &ProjectionMode::Logistic, &mut sink)
        .unwrap_err();
    assert!(matches!(err, PopulationError::UnknownDataset(_)));

    let err = orchestrator
        .run(
            "Brazil",
            &ProjectionMode::Scenario("Ultra Growth".to_string()),
            &mut sink,
        )
        .unwrap_err();
    assert!(matches!(err, PopulationError::UnknownScenario(_)));
}

#[test]
fn test_csv_roundtrip_through_fit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("series.csv");
    let mut series = brazil();
    series.vital_rates = None;

    io::write_series_csv(&series, &path).unwrap();
    let loaded = io::read_series_csv(&path).unwrap();

    let bounds = FitBounds::default_for(&loaded);
    let report = fit_logistic(&loaded, &bounds).unwrap();
    assert!(report.params.k > 215.3);
    assert!(report.params.r > 0.0 && report.params.r <= 0.05);
}

#[test]
fn test_epoch_table_gap_rejected_end_to_end() {
    let table = EpochTable::new(
        "gappy",
        vec![
            Epoch {
                start_year: 1900,
                end_year: 1950,
                baseline_population: 1_000_000.0,
                birth_rate_per_1000: 30.0,
                births_between: None,
            },
            Epoch {
                start_year: 1960,
                end_year: 2000,
                baseline_population: 2_000_000.0,
                birth_rate_per_1000: 20.0,
                births_between: None,
            },
        ],
    );
    let err = accumulate(&table, AccumulatorConfig::default()).unwrap_err();
    assert!(matches!(err, PopulationError::InvalidEpochRange(_)));
}

#[test]
fn test_statistics_on_builtin_series() {
    let stats = SeriesStatistics::compute(&brazil(), 0.95).unwrap();
    // Brazil grew throughout, so the mean interval growth rate is positive
    // and the CI brackets the mean.
    assert!(stats.annual_growth_rate.mean > 0.0);
    assert!(stats.annual_growth_rate.lower < stats.annual_growth_rate.mean);
    assert!(stats.annual_growth_rate.upper > stats.annual_growth_rate.mean);
    assert_eq!(stats.first_year, 1800);
    assert_eq!(stats.last_year, 2023);
}
