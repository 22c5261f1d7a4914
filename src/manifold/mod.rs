//! Manifold abstractions used by the Riemannian optimizer.
//!
//! The optimizer only needs three capabilities from the space it works on:
//! - a geodesic through a point with a given initial velocity, evaluated at
//!   arbitrary parameter `t`;
//! - parallel transport of tangent vectors along that geodesic;
//! - an inner product on each tangent space.
//!
//! Tangent arithmetic (`scale`, `combine`) is routed through the manifold as
//! well, so points and tangent vectors can be any representation.

pub mod euclidean;
pub mod grassmannian;

pub use euclidean::{Euclidean, EuclideanGeodesic};
pub use grassmannian::{Grassmannian, GrassmannianGeodesic};

/// A geodesic `γ(t)` through `origin()` with initial velocity `velocity()`.
pub trait Geodesic {
    type Point: Clone;
    type Tangent: Clone;

    /// Starting point `γ(0)`.
    fn origin(&self) -> &Self::Point;

    /// Initial velocity `γ'(0)`.
    fn velocity(&self) -> &Self::Tangent;

    /// Point `γ(t)`.
    fn evaluate(&self, t: f64) -> Self::Point;

    /// Transports `v`, tangent at `γ(0)`, to `γ(t)`.
    fn parallel_translate(&self, v: &Self::Tangent, t: f64) -> Self::Tangent;
}

/// Riemannian manifold exposing geodesics, transport and a metric.
pub trait Manifold {
    type Point: Clone;
    type Tangent: Clone;
    type Geodesic: Geodesic<Point = Self::Point, Tangent = Self::Tangent>;

    /// Geodesic starting at `x` with initial velocity `velocity`.
    fn geodesic(&self, x: &Self::Point, velocity: Self::Tangent) -> Self::Geodesic;

    /// Metric `<a, b>_x` on the tangent space at `x`.
    fn inner_product(&self, x: &Self::Point, a: &Self::Tangent, b: &Self::Tangent) -> f64;

    /// `alpha * v`.
    fn scale(&self, v: &Self::Tangent, alpha: f64) -> Self::Tangent;

    /// `a * u + b * v`.
    fn combine(&self, a: f64, u: &Self::Tangent, b: f64, v: &Self::Tangent) -> Self::Tangent;

    /// Squared norm `<v, v>_x`.
    fn norm2(&self, x: &Self::Point, v: &Self::Tangent) -> f64 {
        self.inner_product(x, v, v)
    }
}
