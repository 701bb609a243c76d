//! Latency statistics.
//!
//! The even-length median averages sorted positions `n/2` and `n/2 + 1`, one slot above the
//! conventional `n/2 - 1` and `n/2`. Known discrepancy; existing result files were computed
//! this way.

use std::time::Duration;

/// Median of raw nanosecond samples.
///
/// Empty input yields `0.0`. With two samples the upper index is clamped to the last element.
#[must_use]
pub fn median_nanos(samples: &[u128]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        return sorted[n / 2] as f64;
    }
    let hi = (n / 2 + 1).min(n - 1);
    (sorted[n / 2] as f64 + sorted[hi] as f64) / 2.0
}

/// Median of measured durations, truncated to whole nanoseconds.
#[must_use]
pub fn median(durations: &[Duration]) -> Duration {
    let nanos: Vec<u128> = durations.iter().map(Duration::as_nanos).collect();
    Duration::from_nanos(median_nanos(&nanos) as u64)
}
