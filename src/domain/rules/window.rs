use crate::domain::entities::history::MetricHistory;
use crate::domain::value_objects::metric_kind::MetricKind;

/// Number of consecutive samples that cover `sustain_secs` at the given
/// sampling period. Never less than one.
#[must_use]
pub fn points_needed(sustain_secs: u64, sample_period_secs: u64) -> usize {
    let points = sustain_secs.div_ceil(sample_period_secs.max(1)).max(1);
    usize::try_from(points).unwrap_or(usize::MAX)
}

/// Checks the most recent `points` samples of `metric` against `threshold`.
///
/// Returns the newest value in the window when every sample is strictly above
/// the threshold, `None` otherwise or when the history is too short.
#[must_use]
pub fn sustained_above(
    history: &MetricHistory,
    metric: MetricKind,
    threshold: f64,
    points: usize,
) -> Option<f64> {
    let mut window = history.trailing(points)?;
    let mut latest = None;
    let all_exceed = window.all(|sample| {
        let value = metric.value_of(sample);
        latest = Some(value);
        value > threshold
    });
    if all_exceed {
        latest
    } else {
        None
    }
}
