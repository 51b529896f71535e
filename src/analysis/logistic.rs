use serde::{Deserialize, Serialize};

/// Fitted logistic growth parameters.
///
/// The model is `f(t) = K / (1 + ((K - P0) / P0) * e^(-r t))` with `t` in
/// years since the series' first observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Population at `t = 0`.
    pub p0: f64,
    /// Intrinsic growth rate per year.
    pub r: f64,
    /// Carrying capacity.
    pub k: f64,
}

impl LogisticParams {
    /// Evaluate the curve at one offset `t` (years since the time origin).
    pub fn evaluate(&self, t: f64) -> f64 {
        logistic(t, self.p0, self.r, self.k)
    }

    /// Evaluate the curve over a year grid relative to `origin_year`.
    pub fn evaluate_years(&self, years: &[i32], origin_year: i32) -> Vec<f64> {
        years
            .iter()
            .map(|&y| self.evaluate((y - origin_year) as f64))
            .collect()
    }
}

/// The logistic growth function.
pub fn logistic(t: f64, p0: f64, r: f64, k: f64) -> f64 {
    k / (1.0 + ((k - p0) / p0) * (-r * t).exp())
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_logistic_at_origin_equals_p0() {
        assert_approx_eq!(logistic(0.0, 50.0, 0.02, 300.0), 50.0, 1e-9);
    }

    #[test]
    fn test_logistic_bounded_by_capacity() {
        let params = LogisticParams {
            p0: 50.0,
            r: 0.02,
            k: 300.0,
        };
        for t in 0..1000 {
            let v = params.evaluate(t as f64);
            assert!(v >= 0.0);
            assert!(v <= 300.0 + 1e-9, "exceeded K at t={t}: {v}");
        }
    }

    #[test]
    fn test_logistic_monotone_when_p0_below_k() {
        let params = LogisticParams {
            p0: 10.0,
            r: 0.03,
            k: 200.0,
        };
        let mut prev = params.evaluate(0.0);
        for t in 1..500 {
            let v = params.evaluate(t as f64);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_logistic_approaches_capacity() {
        assert_approx_eq!(logistic(10_000.0, 10.0, 0.05, 200.0), 200.0, 1e-6);
    }

    #[test]
    fn test_evaluate_years_uses_origin() {
        let params = LogisticParams {
            p0: 50.0,
            r: 0.02,
            k: 300.0,
        };
        let values = params.evaluate_years(&[1800, 1850], 1800);
        assert_approx_eq!(values[0], 50.0, 1e-9);
        assert_approx_eq!(values[1], params.evaluate(50.0), 1e-12);
    }
}
