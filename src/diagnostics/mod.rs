//! Serializable reports produced by the projection pipeline and the demo.
//!
//! `ProjectionReport` is the top-level document written by the demo binary. It
//! bundles the secant reduction summary, every optimizer run, the resulting
//! length statistics, and a timing breakdown.

pub mod report;
pub mod timing;

pub use report::{CullSummary, InputDescriptor, OptimizeSummary, ProjectionReport};
pub use timing::{StageTiming, TimingBreakdown};
