use crate::optimize::{ConjugateRule, LineSearchParams};

/// Parameters for [`ProjSecant`](super::ProjSecant).
#[derive(Clone, Debug)]
pub struct ProjSecantParams {
    /// Step budget for one `find` call.
    pub max_iterations: usize,
    /// Seed step size for the first line search of a `find` call.
    pub line_search_alpha: f64,
    pub conjugate_rule: ConjugateRule,
    pub line_search: LineSearchParams,
    /// Desired lower bound on (projected length / original length); reported
    /// by the analysis, never enforced.
    pub min_length_target: Option<f64>,
    /// If true, `find` reports per-step records.
    pub collect_trace: bool,
}

impl Default for ProjSecantParams {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            line_search_alpha: 2.0,
            conjugate_rule: ConjugateRule::HestenesStiefel,
            line_search: LineSearchParams::default(),
            min_length_target: None,
            collect_trace: false,
        }
    }
}
