use super::timing::TimingBreakdown;
use crate::optimize::{OptimizeOutcome, StepRecord};
use crate::projection::SecantStatistics;
use crate::secants::SecantSet;
use nalgebra::DMatrix;
use serde::Serialize;

/// Shape of the data the projection was computed from.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub ambient_dimension: usize,
    pub target_dimension: usize,
    pub data_sets: usize,
    pub points: usize,
    pub parameters: Vec<f64>,
}

/// Secant counts before and after angle-based culling.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CullSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_deg: Option<f64>,
    pub normalized: bool,
    /// Secants per set before culling.
    pub before: Vec<usize>,
    /// Representatives per set after culling.
    pub after: Vec<usize>,
    /// Sum of weights per set; equals `before` when culling is exact.
    pub total_weight: Vec<u64>,
}

impl CullSummary {
    pub fn from_sets(
        threshold_deg: Option<f64>,
        normalized: bool,
        raw: &[SecantSet],
        reduced: &[SecantSet],
    ) -> Self {
        Self {
            threshold_deg,
            normalized,
            before: raw.iter().map(SecantSet::len).collect(),
            after: reduced.iter().map(SecantSet::len).collect(),
            total_weight: reduced.iter().map(SecantSet::total_weight).collect(),
        }
    }

    pub fn total_before(&self) -> usize {
        self.before.iter().sum()
    }

    pub fn total_after(&self) -> usize {
        self.after.iter().sum()
    }
}

/// Outcome of one optimizer run on the Grassmannian.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeSummary {
    pub outcome: OptimizeOutcome,
    pub steps: usize,
    pub initial_cost: f64,
    pub final_cost: f64,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<StepRecord>>,
}

impl OptimizeSummary {
    pub fn converged(&self) -> bool {
        self.outcome == OptimizeOutcome::Converged
    }
}

/// Top-level report written by the demo.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    pub input: InputDescriptor,
    pub initial_axes: Option<Vec<usize>>,
    pub culling: CullSummary,
    pub optimize: OptimizeSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_statistics: Option<SecantStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_statistics: Option<SecantStatistics>,
    pub projection: DMatrix<f64>,
    pub timings: TimingBreakdown,
}
