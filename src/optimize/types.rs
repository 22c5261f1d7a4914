use serde::{Deserialize, Serialize};

/// Update rule for the conjugacy coefficient β.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConjugateRule {
    /// β = ‖g‖² / ‖g_prev‖²
    FletcherReeves,
    /// β = ⟨g, g - τg_prev⟩ / ‖τg_prev‖²
    PolakRibiere,
    /// β = ⟨g, g - τg_prev⟩ / ⟨τg_prev, g - τg_prev⟩
    #[default]
    HestenesStiefel,
}

/// How an optimization run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeOutcome {
    /// The line search found no improving step.
    Converged,
    /// The step budget ran out while the cost was still decreasing.
    MaxStepsReached,
    /// The gradient could not be evaluated at the current point.
    Degenerate,
}

/// Per-step trace entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub step: usize,
    pub cost: f64,
    pub alpha: f64,
    pub beta: f64,
    pub grad_norm: f64,
    pub restarted: bool,
}

/// Result of [`ConjugateGradient::optimize`](super::ConjugateGradient::optimize).
#[derive(Clone, Debug)]
pub struct OptimizeResult<P> {
    pub x: P,
    pub outcome: OptimizeOutcome,
    /// Accepted steps.
    pub steps: usize,
    pub initial_cost: f64,
    pub cost: f64,
    pub trace: Option<Vec<StepRecord>>,
}

impl<P> OptimizeResult<P> {
    pub fn converged(&self) -> bool {
        self.outcome == OptimizeOutcome::Converged
    }
}
