//! # Closest-to-mean selection
//!
//! At the end of the temporal pass, the accumulated series of one bin is
//! reduced to a single representative value: the measurement closest to the
//! series mean, together with its time, the number of periods and the
//! population standard deviation.
//!
//! ## Selection rule
//!
//! A linear scan starts from the first entry and replaces the current best
//! `(b, t_b)` by `(m_i, t_i)` whenever any of the following holds:
//!
//! 1. `|m_i − μ| < |b − μ| − ε` (strictly closer to the mean),
//! 2. `||m_i − μ| − |b − μ|| ≤ ε` and `m_i > b` (distance tie, larger value wins),
//! 3. `m_i == b` and `t_i < t_b` (same value, earlier time wins).
//!
//! with `ε =` [`EPS`]. Distances and the mean are evaluated in `f32`; the
//! equality of rule 3 is bit-exact on `f32`.
//!
//! This is the single-cycle variant of the estimator: outliers are not
//! removed before selecting, which is acceptable for the short series a bin
//! usually collects.
//!
//! ## Variance
//!
//! Two formulas are available through [`VarianceMethod`]:
//!
//! - [`VarianceMethod::Legacy`] computes `Σm²/n − μ²`, squaring in `f32`,
//!   summing in `f64` and narrowing `μ` and `σ²` to `f32`. It reproduces
//!   historical outputs bit for bit.
//! - [`VarianceMethod::Welford`] runs a one-pass `f64` Welford update, which
//!   does not suffer from cancellation for large-magnitude values.
//!
//! In both cases a non-positive `σ²` yields `σ = 0`.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{bin_state::BinState, constants::EPS};

/// Formula used for the mean and standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceMethod {
    #[default]
    Legacy,
    Welford,
}

/// Final statistics for one (bin, variable) pair.
///
/// When `count == 0`, `value`, `time` and `sigma` are NaN; otherwise all
/// fields are finite for finite input and `sigma >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationResult {
    pub value: f32,
    pub time: f32,
    pub count: i32,
    pub sigma: f32,
}

impl AggregationResult {
    pub fn empty() -> Self {
        AggregationResult {
            value: f32::NAN,
            time: f32::NAN,
            count: 0,
            sigma: f32::NAN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Output layout: `[value, value_mjd, value_count, value_sigma]`.
    pub fn to_output(&self) -> [f32; 4] {
        [self.value, self.time, self.count as f32, self.sigma]
    }
}

/// Reduces a [`BinState`] to an [`AggregationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatisticalSelector {
    variance: VarianceMethod,
}

impl StatisticalSelector {
    pub fn new(variance: VarianceMethod) -> Self {
        StatisticalSelector { variance }
    }

    pub fn variance_method(&self) -> VarianceMethod {
        self.variance
    }

    /// Compute the statistics of `state`. Does not modify the state, so calling
    /// it twice yields the same result.
    pub fn complete(&self, state: &BinState) -> AggregationResult {
        let measurements = state.measurements();
        let times = state.times();

        if measurements.is_empty() {
            return AggregationResult::empty();
        }

        let (mean, sigma_sqr) = match self.variance {
            VarianceMethod::Legacy => legacy_moments(measurements),
            VarianceMethod::Welford => welford_moments(measurements),
        };
        let sigma = if sigma_sqr > 0.0 {
            (sigma_sqr as f64).sqrt() as f32
        } else {
            0.0
        };

        let (value, time) = closest_to_mean(measurements, times, mean);

        let result = AggregationResult {
            value,
            time,
            count: measurements.len() as i32,
            sigma,
        };
        trace!(
            count = result.count,
            mean,
            value = result.value,
            sigma = result.sigma,
            "temporal pass completed"
        );
        result
    }
}

/// Mean and variance with the historical `Σm²/n − μ²` formula.
fn legacy_moments(measurements: &[f32]) -> (f32, f32) {
    let (sum, sum_sqr) = measurements
        .iter()
        .fold((0.0f64, 0.0f64), |(sum, sum_sqr), &m| {
            (sum + m as f64, sum_sqr + (m * m) as f64)
        });
    let n = measurements.len() as f64;
    let mean = (sum / n) as f32;
    let sigma_sqr = (sum_sqr / n - (mean * mean) as f64) as f32;
    (mean, sigma_sqr)
}

/// Mean and population variance with a one-pass Welford update.
fn welford_moments(measurements: &[f32]) -> (f32, f32) {
    let (mean, m2) = measurements
        .iter()
        .enumerate()
        .fold((0.0f64, 0.0f64), |(mean, m2), (k, &m)| {
            let x = m as f64;
            let delta = x - mean;
            let mean = mean + delta / (k + 1) as f64;
            (mean, m2 + delta * (x - mean))
        });
    let n = measurements.len() as f64;
    (mean as f32, (m2 / n) as f32)
}

/// Scan for the measurement closest to `mean`, applying the tie-break rules.
///
/// `measurements` must be non-empty and as long as `times`.
fn closest_to_mean(measurements: &[f32], times: &[f32], mean: f32) -> (f32, f32) {
    let mut best = measurements[0];
    let mut best_time = times[0];

    for (&m, &t) in measurements.iter().zip_eq(times).skip(1) {
        let current_distance = (m - mean).abs();
        let best_distance = (best - mean).abs();

        let closer = current_distance < best_distance - EPS;
        let tie_larger = (current_distance - best_distance).abs() <= EPS && m > best;
        // exact f32 equality
        let same_earlier = m == best && t < best_time;

        if closer || tie_larger || same_earlier {
            best = m;
            best_time = t;
        }
    }
    (best, best_time)
}

#[cfg(test)]
mod selector_test {
    use super::*;
    use approx::assert_relative_eq;

    fn state_of(pairs: &[(f32, f32)]) -> BinState {
        let mut state = BinState::with_capacity(pairs.len());
        for &(v, t) in pairs {
            state.push_pair(v, t);
        }
        state
    }

    #[test]
    fn test_empty_state() {
        let result = StatisticalSelector::default().complete(&BinState::with_capacity(4));
        assert!(result.is_empty());
        assert!(result.value.is_nan());
        assert!(result.time.is_nan());
        assert!(result.sigma.is_nan());
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_single_entry() {
        for method in [VarianceMethod::Legacy, VarianceMethod::Welford] {
            let result = StatisticalSelector::new(method).complete(&state_of(&[(0.37, 56310.0)]));
            assert_eq!(result.value, 0.37);
            assert_eq!(result.time, 56310.0);
            assert_eq!(result.count, 1);
            assert_eq!(result.sigma, 0.0);
        }
    }

    #[test]
    fn test_closest_to_mean() {
        let state = state_of(&[(1.5, 2013.38), (1.6, 2013.48), (1.8, 2013.58)]);
        let result = StatisticalSelector::default().complete(&state);

        assert_relative_eq!(result.value, 1.6, epsilon = 1e-5);
        assert_relative_eq!(result.time, 2013.48, epsilon = 1e-5);
        assert_eq!(result.count, 3);
        assert_relative_eq!(result.sigma, 0.124721855, epsilon = 1e-5);
    }

    #[test]
    fn test_welford_matches_legacy_on_small_values() {
        let state = state_of(&[(1.5, 2013.38), (1.6, 2013.48), (1.8, 2013.58)]);
        let legacy = StatisticalSelector::new(VarianceMethod::Legacy).complete(&state);
        let welford = StatisticalSelector::new(VarianceMethod::Welford).complete(&state);

        assert_eq!(legacy.value, welford.value);
        assert_eq!(legacy.time, welford.time);
        assert_eq!(legacy.count, welford.count);
        assert_relative_eq!(legacy.sigma, welford.sigma, epsilon = 1e-5);
    }

    #[test]
    fn test_distance_tie_prefers_larger_value() {
        let selector = StatisticalSelector::default();

        let result = selector.complete(&state_of(&[(1.4, 10.0), (1.6, 20.0)]));
        assert_eq!(result.value, 1.6);
        assert_eq!(result.time, 20.0);

        let result = selector.complete(&state_of(&[(1.6, 20.0), (1.4, 10.0)]));
        assert_eq!(result.value, 1.6);
        assert_eq!(result.time, 20.0);
    }

    #[test]
    fn test_equal_values_prefer_earlier_time() {
        let selector = StatisticalSelector::default();

        let result = selector.complete(&state_of(&[(2.0, 100.0), (2.0, 50.0)]));
        assert_eq!(result.value, 2.0);
        assert_eq!(result.time, 50.0);

        let result = selector.complete(&state_of(&[(2.0, 50.0), (2.0, 100.0)]));
        assert_eq!(result.time, 50.0);
    }

    #[test]
    fn test_all_rules_in_one_scan() {
        // mean is 2.0: the 1.0/3.0 tie goes to 3.0, then 2.0 is closer,
        // then the later-supplied but earlier-timed 2.0 replaces it
        let state = state_of(&[(1.0, 10.0), (3.0, 20.0), (2.0, 30.0), (2.0, 5.0)]);
        let result = StatisticalSelector::default().complete(&state);
        assert_eq!(result.value, 2.0);
        assert_eq!(result.time, 5.0);
        assert_eq!(result.count, 4);
    }

    #[test]
    fn test_complete_is_idempotent() {
        let state = state_of(&[(0.2, 1.0), (0.5, 2.0), (0.45, 3.0), (0.9, 4.0)]);
        let selector = StatisticalSelector::default();
        let first = selector.complete(&state);
        let second = selector.complete(&state);
        assert_eq!(first, second);
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_sigma_is_never_negative() {
        let series: [&[f32]; 4] = [
            &[0.1; 7],
            &[1e4 + 0.1, 1e4 + 0.1, 1e4 + 0.1],
            &[0.3333333, 0.3333333, 0.3333334],
            &[-5.5, -5.5, -5.5, -5.5, -5.5],
        ];
        for method in [VarianceMethod::Legacy, VarianceMethod::Welford] {
            for values in series {
                let pairs: Vec<(f32, f32)> =
                    values.iter().enumerate().map(|(i, &v)| (v, i as f32)).collect();
                let result = StatisticalSelector::new(method).complete(&state_of(&pairs));
                assert!(result.sigma >= 0.0, "{method:?} {values:?} -> {}", result.sigma);
                assert!(result.sigma.is_finite());
            }
        }
    }

    #[test]
    fn test_to_output() {
        let result = AggregationResult {
            value: 0.5,
            time: 56300.0,
            count: 7,
            sigma: 0.1,
        };
        assert_eq!(result.to_output(), [0.5, 56300.0, 7.0, 0.1]);

        let empty = AggregationResult::empty().to_output();
        assert!(empty[0].is_nan());
        assert!(empty[1].is_nan());
        assert_eq!(empty[2], 0.0);
        assert!(empty[3].is_nan());
    }

    #[test]
    fn test_variance_method_serde() {
        let method: VarianceMethod = serde_json::from_str("\"welford\"").unwrap();
        assert_eq!(method, VarianceMethod::Welford);
        assert_eq!(serde_json::to_string(&VarianceMethod::Legacy).unwrap(), "\"legacy\"");
    }
}
