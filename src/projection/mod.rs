//! Secant-based projection finder.
//!
//! [`ProjSecant`] owns the current projection `W` (n×d, orthonormal columns)
//! and drives it through the following stages:
//!
//! 1) Initial condition: pick the `d` coordinate axes with the largest spread
//!    of the data and use the matching standard basis columns.
//! 2) Optimization: run Riemannian conjugate gradient on Gr(n, d) against the
//!    secant cost of one secant set or the averaged cost of several. Calling
//!    `find` again continues from the current `W`.
//! 3) Analysis: min / max / mean projected secant length for quality checks.
//! 4) Persistence: binary and CSV forms of `W`.
//!
//! Every stage is an explicit call returning a status or report; the only
//! state that changes is `W`.
//!
//! Notes
//! - A degenerate start (some secant projects to zero) leaves `W` untouched
//!   and is reported as [`OptimizeOutcome::Degenerate`].
//! - A failed read leaves `W` and the target dimension unchanged.

mod analysis;
mod initial;
mod io;
mod params;

pub use analysis::SecantStatistics;
pub use io::{decode_binary, decode_csv, encode_binary, encode_csv};
pub use params::ProjSecantParams;

use crate::cost::{SecantCost, SecantCostMulti};
use crate::diagnostics::OptimizeSummary;
use crate::manifold::grassmannian::orthonormality_error;
use crate::manifold::Grassmannian;
use crate::optimize::{ConjugateGradient, LineSearch, Objective, OptimizeOutcome};
use crate::secants::SecantSet;
use crate::types::{DataSet, DataSystem, Projection};
use log::{info, warn};
use nalgebra::DMatrix;
use std::time::Instant;

/// Tolerance on `‖WᵀW - I‖` accepted by [`ProjSecant::set_projection`].
const ORTHONORMAL_TOL: f64 = 1e-8;

/// Finds a d-dimensional projection that preserves secant lengths.
#[derive(Clone, Debug)]
pub struct ProjSecant {
    params: ProjSecantParams,
    target_dimension: usize,
    w: Projection,
}

impl ProjSecant {
    /// Creates a finder for `target_dimension` with default parameters.
    pub fn new(target_dimension: usize) -> Self {
        Self::with_params(target_dimension, ProjSecantParams::default())
    }

    pub fn with_params(target_dimension: usize, params: ProjSecantParams) -> Self {
        Self {
            params,
            target_dimension,
            w: DMatrix::zeros(0, target_dimension),
        }
    }

    pub fn params(&self) -> &ProjSecantParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ProjSecantParams {
        &mut self.params
    }

    pub fn target_dimension(&self) -> usize {
        self.target_dimension
    }

    /// Current projection; 0×d until initialized.
    pub fn projection(&self) -> &Projection {
        &self.w
    }

    pub fn is_initialized(&self) -> bool {
        self.w.nrows() > 0 && self.w.ncols() > 0
    }

    /// Replaces `W` after checking it is a non-empty orthonormal frame.
    pub fn set_projection(&mut self, w: Projection) -> Result<(), String> {
        if w.nrows() == 0 || w.ncols() == 0 || w.ncols() > w.nrows() {
            return Err(format!(
                "Projection must be n×d with 0 < d <= n, got {}×{}",
                w.nrows(),
                w.ncols()
            ));
        }
        let err = orthonormality_error(&w);
        if !(err <= ORTHONORMAL_TOL) {
            return Err(format!(
                "Projection columns are not orthonormal (‖WᵀW - I‖ = {err:.3e})"
            ));
        }
        self.target_dimension = w.ncols();
        self.w = w;
        Ok(())
    }

    /// Heuristic start from the coordinate spread of a single data set.
    ///
    /// Returns the chosen axes in column order.
    pub fn compute_initial(&mut self, data: &DataSet) -> Result<Vec<usize>, String> {
        if data.is_empty() {
            return Err("Cannot compute an initial projection from an empty data set".into());
        }
        self.initial_from_bounds(&data.bounds())
    }

    /// Heuristic start from the coordinate spread over all sets of a system.
    pub fn compute_initial_system(&mut self, data: &DataSystem) -> Result<Vec<usize>, String> {
        if data.total_points() == 0 {
            return Err("Cannot compute an initial projection from an empty data system".into());
        }
        self.initial_from_bounds(&data.bounds())
    }

    fn initial_from_bounds(&mut self, bounds: &[(f64, f64)]) -> Result<Vec<usize>, String> {
        let spread: Vec<f64> = bounds.iter().map(|(lo, hi)| hi - lo).collect();
        let axes = initial::largest_spread_axes(&spread, self.target_dimension)?;
        self.w = initial::axis_frame(spread.len(), &axes);
        info!("Initial condition: axes {axes:?}");
        Ok(axes)
    }

    /// Optimizes `W` against a single secant set, continuing from the current `W`.
    pub fn find(&mut self, secants: &SecantSet) -> Result<OptimizeSummary, String> {
        self.check_secants(std::slice::from_ref(secants))?;
        Ok(self.run(&SecantCost::new(secants)))
    }

    /// Optimizes `W` against the averaged cost of several secant sets.
    pub fn find_multi(&mut self, sets: &[SecantSet]) -> Result<OptimizeSummary, String> {
        self.check_secants(sets)?;
        Ok(self.run(&SecantCostMulti::new(sets)))
    }

    fn run<O: Objective<Grassmannian>>(&mut self, objective: &O) -> OptimizeSummary {
        let start = Instant::now();
        let mut cg = ConjugateGradient::new(Grassmannian)
            .with_rule(self.params.conjugate_rule)
            .with_max_steps(self.params.max_iterations)
            .with_trace(self.params.collect_trace);
        cg.line_search =
            LineSearch::with_params(self.params.line_search_alpha, self.params.line_search);

        let result = cg.optimize(self.w.clone(), objective);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        match result.outcome {
            OptimizeOutcome::Converged => info!(
                "Projection converged after {} steps: cost {:.6e} -> {:.6e}",
                result.steps, result.initial_cost, result.cost
            ),
            OptimizeOutcome::MaxStepsReached => info!(
                "Projection used its budget of {} steps: cost {:.6e} -> {:.6e}",
                self.params.max_iterations, result.initial_cost, result.cost
            ),
            OptimizeOutcome::Degenerate => {
                warn!("Projection: a secant projects to zero at the current W")
            }
        }

        self.w = result.x;
        OptimizeSummary {
            outcome: result.outcome,
            steps: result.steps,
            initial_cost: result.initial_cost,
            final_cost: result.cost,
            elapsed_ms,
            trace: result.trace,
        }
    }

    fn check_secants(&self, sets: &[SecantSet]) -> Result<(), String> {
        if !self.is_initialized() {
            return Err("Projection is not initialized; compute or load an initial W first".into());
        }
        let n = self.w.nrows();
        for (idx, set) in sets.iter().enumerate() {
            if !set.is_empty() && set.dimension() != n {
                return Err(format!(
                    "Secant set {idx} lives in R^{} but the projection expects R^{n}",
                    set.dimension()
                ));
            }
        }
        Ok(())
    }

    /// Projected length statistics for one secant set.
    pub fn analyse_secants(&self, secants: &SecantSet) -> Option<SecantStatistics> {
        self.analyse_secants_multi(std::slice::from_ref(secants))
    }

    /// Projected length statistics pooled over several secant sets.
    pub fn analyse_secants_multi(&self, sets: &[SecantSet]) -> Option<SecantStatistics> {
        let stats = analysis::projected_lengths(&self.w, sets, self.params.min_length_target)?;
        info!(
            "Projected lengths: range [{:.6}, {:.6}], mean {:.6}, min ratio {:.6}",
            stats.min, stats.max, stats.mean, stats.min_ratio
        );
        Some(stats)
    }
}
