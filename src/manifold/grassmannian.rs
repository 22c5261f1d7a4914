//! Grassmann manifold Gr(n, d) of d-dimensional subspaces of R^n.
//!
//! Points are represented by n×d frames `X` with orthonormal columns; two
//! frames describe the same subspace when they differ by a right rotation.
//! Tangent vectors are n×d matrices restricted to the horizontal space
//! `{V : XᵀV = 0}`, the directions that actually move the subspace.
//!
//! Geodesics use the closed form of Edelman, Arias and Smith. With the thin
//! SVD `V = U Σ Qᵀ` of the initial velocity,
//!
//! ```text
//! γ(t) = X Q cos(Σt) Qᵀ + U sin(Σt) Qᵀ
//! ```
//!
//! and a horizontal vector `Δ` is transported as
//!
//! ```text
//! τΔ(t) = Δ + ( -X Q sin(Σt) + U (cos(Σt) - I) ) Uᵀ Δ
//! ```
//!
//! Orthonormality of `γ(t)` holds by construction for horizontal velocities;
//! frames are never re-orthogonalized after the fact.
//!
//! The metric is the Frobenius inner product `tr(AᵀB)`.

use super::{Geodesic, Manifold};
use log::warn;
use nalgebra::{DMatrix, DVector};

/// Gr(n, d) with frames and tangent vectors stored as `DMatrix<f64>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Grassmannian;

impl Grassmannian {
    /// Horizontal part `G - X (Xᵀ G)` of an ambient n×d matrix at frame `x`.
    pub fn horizontal_component(x: &DMatrix<f64>, g: &DMatrix<f64>) -> DMatrix<f64> {
        g - x * (x.transpose() * g)
    }
}

impl Manifold for Grassmannian {
    type Point = DMatrix<f64>;
    type Tangent = DMatrix<f64>;
    type Geodesic = GrassmannianGeodesic;

    fn geodesic(&self, x: &DMatrix<f64>, velocity: DMatrix<f64>) -> GrassmannianGeodesic {
        GrassmannianGeodesic::new(x, Self::horizontal_component(x, &velocity))
    }

    fn inner_product(&self, _x: &DMatrix<f64>, a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
        a.dot(b)
    }

    fn scale(&self, v: &DMatrix<f64>, alpha: f64) -> DMatrix<f64> {
        v * alpha
    }

    fn combine(&self, a: f64, u: &DMatrix<f64>, b: f64, v: &DMatrix<f64>) -> DMatrix<f64> {
        u * a + v * b
    }
}

/// Geodesic on Gr(n, d) with its velocity SVD cached for repeated evaluation.
#[derive(Clone, Debug)]
pub struct GrassmannianGeodesic {
    x: DMatrix<f64>,
    velocity: DMatrix<f64>,
    /// `X Q`, n×k.
    xq: DMatrix<f64>,
    /// Left singular vectors, n×k.
    u: DMatrix<f64>,
    sigma: DVector<f64>,
    /// `Qᵀ`, k×d.
    q_t: DMatrix<f64>,
}

impl GrassmannianGeodesic {
    /// Builds the geodesic; `velocity` must already be horizontal at `x`.
    pub fn new(x: &DMatrix<f64>, velocity: DMatrix<f64>) -> Self {
        let svd = velocity.clone().svd(true, true);
        match (svd.u, svd.v_t) {
            (Some(u), Some(q_t)) => Self {
                x: x.clone(),
                xq: x * q_t.transpose(),
                u,
                sigma: svd.singular_values,
                q_t,
                velocity,
            },
            _ => {
                warn!("Grassmannian geodesic: SVD did not converge, using a stationary curve");
                let d = x.ncols();
                Self {
                    x: x.clone(),
                    xq: x.clone(),
                    u: DMatrix::zeros(x.nrows(), d),
                    sigma: DVector::zeros(d),
                    q_t: DMatrix::identity(d, d),
                    velocity,
                }
            }
        }
    }
}

impl Geodesic for GrassmannianGeodesic {
    type Point = DMatrix<f64>;
    type Tangent = DMatrix<f64>;

    fn origin(&self) -> &DMatrix<f64> {
        &self.x
    }

    fn velocity(&self) -> &DMatrix<f64> {
        &self.velocity
    }

    fn evaluate(&self, t: f64) -> DMatrix<f64> {
        let mut a = self.xq.clone();
        let mut b = self.u.clone();
        for (i, s) in self.sigma.iter().enumerate() {
            let (sin, cos) = (s * t).sin_cos();
            a.column_mut(i).scale_mut(cos);
            b.column_mut(i).scale_mut(sin);
        }
        (a + b) * &self.q_t
    }

    fn parallel_translate(&self, v: &DMatrix<f64>, t: f64) -> DMatrix<f64> {
        let ut_v = self.u.transpose() * v;
        let mut a = self.xq.clone();
        let mut b = self.u.clone();
        for (i, s) in self.sigma.iter().enumerate() {
            let (sin, cos) = (s * t).sin_cos();
            a.column_mut(i).scale_mut(-sin);
            b.column_mut(i).scale_mut(cos - 1.0);
        }
        v + (a + b) * ut_v
    }
}

/// Frobenius distance `‖WᵀW - I‖` from an orthonormal frame.
pub fn orthonormality_error(w: &DMatrix<f64>) -> f64 {
    let d = w.ncols();
    (w.transpose() * w - DMatrix::<f64>::identity(d, d)).norm()
}
