#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod io;
pub mod projection;
pub mod secants;
pub mod types;

// Building blocks – public for experiments and alternative objectives.
pub mod angle;
pub mod config;
pub mod cost;
pub mod manifold;
pub mod optimize;
pub mod synthetic;

// --- High-level re-exports -------------------------------------------------

// Main entry point: the projection finder and its inputs.
pub use crate::projection::{ProjSecant, ProjSecantParams, SecantStatistics};
pub use crate::secants::SecantSet;
pub use crate::types::{DataSet, DataSystem, Point, Projection};

// Run summaries returned by the finder.
pub use crate::diagnostics::{OptimizeSummary, ProjectionReport};

// The optimizer is generic over any manifold.
pub use crate::manifold::{Euclidean, Geodesic, Grassmannian, Manifold};
pub use crate::optimize::{ConjugateGradient, ConjugateRule, Objective, OptimizeOutcome};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use secant_projection::prelude::*;
///
/// # fn main() -> Result<(), String> {
/// let data = DataSet::from_rows(&[
///     &[0.0, 0.0, 0.0, 0.1],
///     &[1.0, 0.2, 0.0, 0.0],
///     &[0.0, 1.0, 0.3, 0.0],
///     &[0.2, 0.0, 1.0, 0.5],
/// ])?;
/// let secants = SecantSet::from_points(&data);
///
/// let mut proj = ProjSecant::new(2);
/// proj.compute_initial(&data)?;
/// let summary = proj.find(&secants)?;
/// println!("{:?} after {} steps", summary.outcome, summary.steps);
/// if let Some(stats) = proj.analyse_secants(&secants) {
///     println!("min projected length {:.4}", stats.min);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{DataSet, DataSystem, ProjSecant, ProjSecantParams, SecantSet};
}
