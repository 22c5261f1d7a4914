//! Riemannian conjugate-gradient optimization.
//!
//! The solver is generic over any [`Manifold`](crate::manifold::Manifold):
//! it walks geodesics, transports the previous search direction to the new
//! point, and mixes it into the negative gradient with one of the classical
//! conjugacy rules (Fletcher–Reeves, Polak–Ribière, Hestenes–Stiefel).
//!
//! Each step runs a derivative-based line search along the current
//! geodesic. A step is only taken when it lowers the cost, so the cost
//! sequence of accepted iterates never increases. A line search that finds
//! no improving step is the normal convergence signal.

mod conjugate_gradient;
mod line_search;
mod objective;
mod types;

pub use conjugate_gradient::{ConjugateGradient, StepOutcome};
pub use line_search::{LineSearch, LineSearchParams, LineSearchResult};
pub use objective::{FnObjective, Objective};
pub use types::{ConjugateRule, OptimizeOutcome, OptimizeResult, StepRecord};
