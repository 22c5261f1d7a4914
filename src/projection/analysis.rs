use crate::secants::SecantSet;
use crate::types::Projection;
use serde::Serialize;

/// Projected secant length summary.
///
/// Lengths are measured on the secants as stored (raw or normalized), so for
/// a normalized set `min`/`max`/`mean` are directly the retained fraction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecantStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Smallest ratio of projected to original length.
    pub min_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_met: Option<bool>,
}

/// Unweighted statistics over every secant of every set; `None` when empty
/// or when `w` does not match the secant dimension.
pub(super) fn projected_lengths(
    w: &Projection,
    sets: &[SecantSet],
    target: Option<f64>,
) -> Option<SecantStatistics> {
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut min_ratio = f64::INFINITY;

    for set in sets.iter().filter(|s| !s.is_empty()) {
        if set.dimension() != w.nrows() {
            return None;
        }
        for secant in set.secants() {
            let len = (w.transpose() * secant).norm();
            let orig = secant.norm();
            count += 1;
            min = min.min(len);
            max = max.max(len);
            sum += len;
            if orig > 0.0 {
                min_ratio = min_ratio.min(len / orig);
            }
        }
    }

    if count == 0 {
        return None;
    }
    Some(SecantStatistics {
        count,
        min,
        max,
        mean: sum / count as f64,
        min_ratio,
        target,
        target_met: target.map(|t| min_ratio >= t),
    })
}
