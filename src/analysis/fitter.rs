//! Bounded nonlinear least-squares fitting of the logistic growth model.
//!
//! The solver is a projected Levenberg-Marquardt iteration: candidate steps
//! come from the damped normal equations and are clamped to the box bounds
//! before evaluation. The logistic function is non-convex in `r` and
//! ill-conditioned near `P0 -> 0`, so the damping uses Marquardt's diagonal
//! scaling rather than a plain identity shift.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::logistic::{logistic, LogisticParams};
use crate::error::PopulationError;
use crate::models::{HistoricalSeries, ScenarioParams};

const MAX_ITERATIONS: usize = 200;
const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MAX: f64 = 1e10;
const FTOL: f64 = 1e-12;
const XTOL: f64 = 1e-10;

/// Box constraints for the full three-parameter fit, ordered `[P0, r, K]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitBounds {
    pub lower: [f64; 3],
    pub upper: [f64; 3],
}

impl FitBounds {
    /// The default policy: `P0` within the observed range, `r` up to 0.05,
    /// `K` up to 1.5x the observed maximum.
    pub fn default_for(series: &HistoricalSeries) -> Self {
        let max_pop = series.max_population();
        Self {
            lower: [0.0, 0.0, 0.0],
            upper: [max_pop, 0.05, 1.5 * max_pop],
        }
    }

    fn validate(&self) -> Result<(), PopulationError> {
        for i in 0..3 {
            if !(self.lower[i].is_finite() && self.upper[i].is_finite())
                || self.lower[i] >= self.upper[i]
            {
                return Err(PopulationError::ValidationError(format!(
                    "fit bounds must satisfy lower < upper, got [{}, {}]",
                    self.lower[i], self.upper[i]
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a successful fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub params: LogisticParams,
    /// Residual sum of squares at the solution.
    pub rss: f64,
    pub iterations: usize,
}

/// Fit all three logistic parameters to a historical series.
pub fn fit_logistic(
    series: &HistoricalSeries,
    bounds: &FitBounds,
) -> Result<FitReport, PopulationError> {
    check_fit_input(series)?;
    bounds.validate()?;

    let (t, y) = offsets(series);
    let max_pop = series.max_population();

    // Start interior: P0 near the first observation, r mid-range, K a bit
    // above the observed maximum.
    let init = vec![
        clamp_interior(y[0], bounds.lower[0], bounds.upper[0], max_pop),
        clamp_interior(
            0.5 * (bounds.lower[1] + bounds.upper[1]),
            bounds.lower[1],
            bounds.upper[1],
            1.0,
        ),
        clamp_interior(1.2 * max_pop, bounds.lower[2], bounds.upper[2], max_pop),
    ];
    // P0 = 0 and K = 0 are poles of the model, so the solver floor for those
    // parameters is a hair above the stated lower bound.
    let lower = vec![
        bounds.lower[0].max(1e-9 * max_pop),
        bounds.lower[1],
        bounds.lower[2].max(1e-9 * max_pop),
    ];
    let upper = bounds.upper.to_vec();

    let solved = solve_bounded_lm(
        &t,
        &y,
        init,
        &lower,
        &upper,
        |p, ti| logistic(ti, p[0], p[1], p[2]),
        |p, ti, row| {
            let (p0, r, k) = (p[0], p[1], p[2]);
            let e = (-r * ti).exp();
            let d = 1.0 + ((k - p0) / p0) * e;
            row[0] = k * k * e / (p0 * p0 * d * d);
            row[1] = k * ((k - p0) / p0) * ti * e / (d * d);
            row[2] = 1.0 / d - k * e / (p0 * d * d);
        },
    )?;

    Ok(FitReport {
        params: LogisticParams {
            p0: solved.params[0],
            r: solved.params[1],
            k: solved.params[2],
        },
        rss: solved.rss,
        iterations: solved.iterations,
    })
}

/// Scenario mode: `r` and `K` are fixed externally and only `P0` is fitted,
/// bounded by `(0, max(population)]`.
pub fn fit_initial_population(
    series: &HistoricalSeries,
    scenario: &ScenarioParams,
) -> Result<FitReport, PopulationError> {
    check_fit_input(series)?;

    let (t, y) = offsets(series);
    let max_pop = series.max_population();
    let (r, k) = (scenario.growth_rate, scenario.carrying_capacity);

    let init = vec![clamp_interior(y[0], 0.0, max_pop, max_pop)];
    let lower = vec![1e-9 * max_pop];
    let upper = vec![max_pop];

    let solved = solve_bounded_lm(
        &t,
        &y,
        init,
        &lower,
        &upper,
        |p, ti| logistic(ti, p[0], r, k),
        |p, ti, row| {
            let p0 = p[0];
            let e = (-r * ti).exp();
            let d = 1.0 + ((k - p0) / p0) * e;
            row[0] = k * k * e / (p0 * p0 * d * d);
        },
    )?;

    Ok(FitReport {
        params: LogisticParams {
            p0: solved.params[0],
            r,
            k,
        },
        rss: solved.rss,
        iterations: solved.iterations,
    })
}

fn check_fit_input(series: &HistoricalSeries) -> Result<(), PopulationError> {
    series.validate()?;
    if series.len() < 3 {
        return Err(PopulationError::InsufficientData(format!(
            "logistic fitting needs at least 3 samples, got {}",
            series.len()
        )));
    }
    Ok(())
}

/// Years-since-first-sample offsets and observations. The shifted domain
/// keeps the exponential term small in magnitude.
fn offsets(series: &HistoricalSeries) -> (Vec<f64>, Vec<f64>) {
    let origin = series.years[0];
    let t = series.years.iter().map(|&y| (y - origin) as f64).collect();
    (t, series.population.clone())
}

fn clamp_interior(value: f64, lower: f64, upper: f64, scale: f64) -> f64 {
    let eps = 1e-6 * scale.max(1.0);
    value.clamp(lower + eps, upper - eps)
}

struct Solved {
    params: Vec<f64>,
    rss: f64,
    iterations: usize,
}

fn residual_sum_of_squares<F>(model: &F, params: &[f64], t: &[f64], y: &[f64]) -> f64
where
    F: Fn(&[f64], f64) -> f64,
{
    t.iter()
        .zip(y)
        .map(|(&ti, &yi)| {
            let r = model(params, ti) - yi;
            r * r
        })
        .sum()
}

/// Projected Levenberg-Marquardt over box bounds.
///
/// `model(params, t)` evaluates the curve; `jacobian(params, t, row)` fills
/// one row of partial derivatives. Terminates on step size (`XTOL`), on
/// relative cost improvement (`FTOL`), or when damping saturates with no
/// accepting step left; exhausting the iteration budget while still making
/// progress is reported as `FitDidNotConverge`.
fn solve_bounded_lm<F, J>(
    t: &[f64],
    y: &[f64],
    init: Vec<f64>,
    lower: &[f64],
    upper: &[f64],
    model: F,
    jacobian: J,
) -> Result<Solved, PopulationError>
where
    F: Fn(&[f64], f64) -> f64,
    J: Fn(&[f64], f64, &mut [f64]),
{
    let n = t.len();
    let p = init.len();
    let mut params = init;
    let mut rss = residual_sum_of_squares(&model, &params, t, y);
    if !rss.is_finite() {
        return Err(PopulationError::FitDidNotConverge(
            "initial residuals are not finite".to_string(),
        ));
    }

    let mut lambda = LAMBDA_INIT;
    let mut row = vec![0.0; p];

    for iteration in 1..=MAX_ITERATIONS {
        let mut jac = DMatrix::<f64>::zeros(n, p);
        let mut residuals = DVector::<f64>::zeros(n);
        for i in 0..n {
            jacobian(&params, t[i], &mut row);
            for j in 0..p {
                jac[(i, j)] = row[j];
            }
            residuals[i] = model(&params, t[i]) - y[i];
        }

        let jtj = jac.transpose() * &jac;
        let gradient = jac.transpose() * &residuals;

        // Raise damping until a step improves the cost.
        loop {
            let mut damped = jtj.clone();
            for j in 0..p {
                let d = jtj[(j, j)].max(1e-12);
                damped[(j, j)] += lambda * d;
            }

            let Some(step) = damped.lu().solve(&(-&gradient)) else {
                lambda *= 10.0;
                if lambda > LAMBDA_MAX {
                    return finish(params, rss, iteration);
                }
                continue;
            };

            let mut candidate = params.clone();
            for j in 0..p {
                candidate[j] = (params[j] + step[j]).clamp(lower[j], upper[j]);
            }
            let candidate_rss = residual_sum_of_squares(&model, &candidate, t, y);

            if candidate_rss.is_finite() && candidate_rss < rss {
                // Effective step after projection, relative to parameter scale.
                let max_rel_step = params
                    .iter()
                    .zip(&candidate)
                    .map(|(&a, &b)| (b - a).abs() / a.abs().max(1.0))
                    .fold(0.0, f64::max);
                let improvement = (rss - candidate_rss) / rss.max(FTOL);

                params = candidate;
                rss = candidate_rss;
                lambda = (lambda / 10.0).max(1e-12);

                debug!(iteration, rss, lambda, "lm step accepted");
                if max_rel_step < XTOL || improvement < FTOL {
                    return finish(params, rss, iteration);
                }
                break;
            }

            lambda *= 10.0;
            if lambda > LAMBDA_MAX {
                // No feasible descent direction left: at a bound-constrained
                // minimum within numeric resolution.
                return finish(params, rss, iteration);
            }
        }
    }

    Err(PopulationError::FitDidNotConverge(format!(
        "no convergence within {MAX_ITERATIONS} iterations (rss {rss:.6e})"
    )))
}

fn finish(params: Vec<f64>, rss: f64, iterations: usize) -> Result<Solved, PopulationError> {
    if !rss.is_finite() {
        return Err(PopulationError::FitDidNotConverge(
            "residuals are not finite at the solution".to_string(),
        ));
    }
    Ok(Solved {
        params,
        rss,
        iterations,
    })
}
