use serde::{Deserialize, Serialize};

/// Summary of one action's simulated total-cost distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p05: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile with linear interpolation between order statistics.
/// `sorted` must be ascending; `pct` is in [0, 100].
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

pub fn percentile(values: &[f64], pct: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile_sorted(&sorted, pct)
}

/// Full reduction of a cost sequence: moments plus the five standard
/// percentiles. Deterministic for a given input sequence.
pub fn compute_stats(values: &[f64]) -> CostStats {
    if values.is_empty() {
        return CostStats {
            mean: 0.0,
            median: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
            p05: 0.0,
            p25: 0.0,
            p50: 0.0,
            p75: 0.0,
            p95: 0.0,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let m = mean(values);
    // Population variance, matching the reference summarizer.
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    let p50 = percentile_sorted(&sorted, 50.0);

    CostStats {
        mean: m,
        median: p50,
        std: variance.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        p05: percentile_sorted(&sorted, 5.0),
        p25: percentile_sorted(&sorted, 25.0),
        p50,
        p75: percentile_sorted(&sorted, 75.0),
        p95: percentile_sorted(&sorted, 95.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn percentile_interpolates_linearly() {
        let values = [10.0, 20.0, 30.0, 40.0];
        // rank = 0.5 * 3 = 1.5 -> halfway between 20 and 30
        assert!((percentile(&values, 50.0) - 25.0).abs() < EPS);
        // rank = 0.25 * 3 = 0.75 -> 10 + 0.75 * 10
        assert!((percentile(&values, 25.0) - 17.5).abs() < EPS);
        assert!((percentile(&values, 0.0) - 10.0).abs() < EPS);
        assert!((percentile(&values, 100.0) - 40.0).abs() < EPS);
    }

    #[test]
    fn percentile_handles_unsorted_input() {
        let values = [40.0, 10.0, 30.0, 20.0];
        assert!((percentile(&values, 50.0) - 25.0).abs() < EPS);
    }

    #[test]
    fn stats_on_known_sequence() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = compute_stats(&values);
        assert!((stats.mean - 5.0).abs() < EPS);
        // Population std of this classic sequence is exactly 2.
        assert!((stats.std - 2.0).abs() < EPS);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert!((stats.median - 4.5).abs() < EPS);
        assert_eq!(stats.median, stats.p50);
    }

    #[test]
    fn single_value_collapses_everything() {
        let stats = compute_stats(&[42.0]);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.p05, 42.0);
        assert_eq!(stats.p95, 42.0);
        assert_eq!(stats.std, 0.0);
    }

    #[test]
    fn empty_input_yields_zeros() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.max, 0.0);
    }
}
