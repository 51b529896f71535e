use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use population_analyzer::{io::write_series_csv, models::HistoricalSeries};

fn cmd() -> Command {
    Command::cargo_bin("population-analyzer").unwrap()
}

/// Write a small synthetic series to a CSV file in the given directory.
fn create_test_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("testland.csv");
    let series = HistoricalSeries::new(
        vec![1900, 1925, 1950, 1975, 2000, 2025],
        vec![10.0, 18.0, 31.0, 48.0, 66.0, 80.0],
    );
    write_series_csv(&series, &path).unwrap();
    path
}

#[test]
fn test_list_shows_builtin_datasets() {
    cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Brazil"))
        .stdout(predicate::str::contains("World"))
        .stdout(predicate::str::contains("Moderate Growth"));
}

#[test]
fn test_accumulate_world() {
    cmd()
        .args(["accumulate", "--dataset", "World", "--stride", "50000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Births"))
        .stdout(predicate::str::contains("Years Simulated"));
}

#[test]
fn test_accumulate_even_split() {
    cmd()
        .args([
            "accumulate",
            "--dataset",
            "World",
            "--strategy",
            "even-split",
            "--stride",
            "50000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Births"));
}

#[test]
fn test_accumulate_with_adjustment() {
    cmd()
        .args([
            "accumulate",
            "--dataset",
            "World",
            "--stride",
            "50000",
            "--adjustment",
            "1000000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adjusted total"));
}

#[test]
fn test_accumulate_rejects_bad_dampening() {
    cmd()
        .args(["accumulate", "--dataset", "World", "--dampening", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dampening"));
}

#[test]
fn test_project_brazil() {
    cmd()
        .args(["project", "--dataset", "Brazil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logistic Projection"))
        .stdout(predicate::str::contains("2100"));
}

#[test]
fn test_project_with_chart() {
    cmd()
        .args(["project", "--dataset", "Brazil", "--chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Population Trajectory"));
}

#[test]
fn test_project_from_csv_input() {
    let dir = TempDir::new().unwrap();
    let path = create_test_csv(&dir);

    cmd()
        .args(["project", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("testland"))
        .stdout(predicate::str::contains("2100"));
}

#[test]
fn test_project_unknown_dataset_fails() {
    cmd()
        .args(["project", "--dataset", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Atlantis"));
}

#[test]
fn test_scenario_moderate_growth() {
    cmd()
        .args(["scenario", "--dataset", "Brazil", "--name", "Moderate Growth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moderate Growth"))
        .stdout(predicate::str::contains("Growth over horizon"));
}

#[test]
fn test_scenario_low_growth_reports_degenerate_capacity() {
    cmd()
        .args(["scenario", "--dataset", "Brazil", "--name", "Low Growth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("carrying capacity"));
}

#[test]
fn test_scenario_unknown_name_fails() {
    cmd()
        .args(["scenario", "--dataset", "Brazil", "--name", "Ultra Growth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ultra Growth"));
}

#[test]
fn test_analyze_brazil() {
    cmd()
        .args(["analyze", "--dataset", "Brazil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Annual Growth Rate"))
        .stdout(predicate::str::contains("Lower CI"));
}

#[test]
fn test_custom_scenario_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenarios.toml");
    std::fs::write(
        &path,
        "[\"Ultra Growth\"]\ngrowth_rate = 0.03\ncapacity_ratio = 2.0\n",
    )
    .unwrap();

    cmd()
        .arg("--scenarios")
        .arg(&path)
        .args(["scenario", "--dataset", "Brazil", "--name", "Ultra Growth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ultra Growth"));
}
