//! Secant-preservation cost on Gr(n, d) and its Riemannian gradient.
//!
//! For a frame `X` and secants `s_j` with weights `w_j`:
//!
//! ```text
//! cost(X) = Σ_j w_j / ‖Xᵀ s_j‖  /  Σ_j w_j
//! grad(X) = H( X, -(1/Σ w) Σ_j w_j s_j (Xᵀ s_j)ᵀ / ‖Xᵀ s_j‖³ )
//! ```
//!
//! where `H(X, G) = G - X XᵀG` keeps the horizontal part. Unweighted sets use
//! `w_j = 1`. The cost grows without bound as any projected secant shrinks,
//! which pushes the optimizer away from projections that fold distinct
//! samples onto each other.
//!
//! A secant whose projection is exactly zero makes the point degenerate: the
//! cost evaluates to `+inf` and the gradient to `None`, so the line search
//! rejects it instead of carrying NaN forward.
//!
//! The multi-set variants average the per-set cost and gradient with equal
//! weight per set, regardless of how many secants each set holds.

use crate::manifold::{Grassmannian, Manifold};
use crate::optimize::Objective;
use crate::secants::SecantSet;
use nalgebra::DMatrix;

/// Cost over a single secant set.
#[derive(Clone, Copy, Debug)]
pub struct SecantCost<'a> {
    secants: &'a SecantSet,
}

impl<'a> SecantCost<'a> {
    pub fn new(secants: &'a SecantSet) -> Self {
        Self { secants }
    }

    /// Cost at `x`; `+inf` if some secant projects to zero. Empty sets cost 1.
    pub fn evaluate(&self, x: &DMatrix<f64>) -> f64 {
        if self.secants.is_empty() {
            return 1.0;
        }
        let mut sum = 0.0;
        for (secant, weight) in self.secants.iter() {
            let len = x.tr_mul(secant).norm();
            if !(len > 0.0) {
                return f64::INFINITY;
            }
            sum += weight as f64 / len;
        }
        sum / self.secants.total_weight() as f64
    }

    /// Euclidean gradient of the cost in the ambient n×d space.
    pub fn ambient_gradient(&self, x: &DMatrix<f64>) -> Option<DMatrix<f64>> {
        let mut sum = DMatrix::zeros(x.nrows(), x.ncols());
        if self.secants.is_empty() {
            return Some(sum);
        }
        for (secant, weight) in self.secants.iter() {
            let projected = x.tr_mul(secant);
            let len = projected.norm();
            if !(len > 0.0) {
                return None;
            }
            // sum += w / len³ · s pᵀ
            sum.ger(weight as f64 / (len * len * len), secant, &projected, 1.0);
        }
        let scale = -1.0 / self.secants.total_weight() as f64;
        sum *= scale;
        sum.iter().all(|v| v.is_finite()).then_some(sum)
    }

    /// Horizontal (Riemannian) gradient at `x`.
    pub fn gradient(&self, x: &DMatrix<f64>) -> Option<DMatrix<f64>> {
        self.ambient_gradient(x)
            .map(|g| Grassmannian::horizontal_component(x, &g))
    }
}

impl Objective<Grassmannian> for SecantCost<'_> {
    fn value(&self, x: &DMatrix<f64>) -> f64 {
        self.evaluate(x)
    }

    fn gradient(&self, x: &DMatrix<f64>) -> Option<DMatrix<f64>> {
        SecantCost::gradient(self, x)
    }
}

/// Unweighted average of [`SecantCost`] over independent sets.
#[derive(Clone, Copy, Debug)]
pub struct SecantCostMulti<'a> {
    sets: &'a [SecantSet],
}

impl<'a> SecantCostMulti<'a> {
    pub fn new(sets: &'a [SecantSet]) -> Self {
        Self { sets }
    }

    /// Mean of the per-set costs. An empty collection costs 1.
    pub fn evaluate(&self, x: &DMatrix<f64>) -> f64 {
        if self.sets.is_empty() {
            return 1.0;
        }
        let sum: f64 = self
            .sets
            .iter()
            .map(|s| SecantCost::new(s).evaluate(x))
            .sum();
        sum / self.sets.len() as f64
    }

    /// Mean of the per-set horizontal gradients.
    pub fn gradient(&self, x: &DMatrix<f64>) -> Option<DMatrix<f64>> {
        let mut sum = DMatrix::zeros(x.nrows(), x.ncols());
        if self.sets.is_empty() {
            return Some(sum);
        }
        for set in self.sets {
            sum += SecantCost::new(set).gradient(x)?;
        }
        Some(Grassmannian.scale(&sum, 1.0 / self.sets.len() as f64))
    }
}

impl Objective<Grassmannian> for SecantCostMulti<'_> {
    fn value(&self, x: &DMatrix<f64>) -> f64 {
        self.evaluate(x)
    }

    fn gradient(&self, x: &DMatrix<f64>) -> Option<DMatrix<f64>> {
        SecantCostMulti::gradient(self, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataSet;
    use nalgebra::DVector;

    fn simplex_secants() -> SecantSet {
        let data = DataSet::from_rows(&[
            &[0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
        ])
        .unwrap();
        SecantSet::from_points(&data)
    }

    fn tilted_plane() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 2, &[1.0, 0.1, 0.2, 1.0, 0.5, -0.6])
            .qr()
            .q()
    }

    #[test]
    fn cost_is_positive_and_finite_for_generic_frame() {
        let secants = simplex_secants();
        let c = SecantCost::new(&secants).evaluate(&tilted_plane());
        assert!(c.is_finite() && c > 0.0, "cost={c}");
    }

    #[test]
    fn zero_projection_is_degenerate() {
        let secants = simplex_secants();
        let axes = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let cost = SecantCost::new(&secants);
        assert_eq!(cost.evaluate(&axes), f64::INFINITY);
        assert!(cost.gradient(&axes).is_none());
    }

    #[test]
    fn identity_projection_of_unit_secants_costs_one() {
        let data = DataSet::from_rows(&[&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]]).unwrap();
        let secants = SecantSet::from_points(&data).normalized();
        let x = DMatrix::<f64>::identity(2, 2);
        let c = SecantCost::new(&secants).evaluate(&x);
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weighted_cost_matches_expanded_unweighted_set() {
        let v = |xs: &[f64]| DVector::from_column_slice(xs);
        let weighted =
            SecantSet::from_weighted(3, vec![v(&[1.0, 2.0, 0.5]), v(&[0.0, 1.0, 3.0])], vec![3, 1])
                .unwrap();
        let expanded = SecantSet::from_vectors(
            3,
            vec![
                v(&[1.0, 2.0, 0.5]),
                v(&[1.0, 2.0, 0.5]),
                v(&[1.0, 2.0, 0.5]),
                v(&[0.0, 1.0, 3.0]),
            ],
        )
        .unwrap();
        let x = tilted_plane();
        let a = SecantCost::new(&weighted).evaluate(&x);
        let b = SecantCost::new(&expanded).evaluate(&x);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn ambient_gradient_matches_finite_differences() {
        let secants = simplex_secants();
        let cost = SecantCost::new(&secants);
        let x = tilted_plane();
        let g = cost.ambient_gradient(&x).unwrap();
        let h = 1e-6;
        for i in 0..3 {
            for j in 0..2 {
                let mut xp = x.clone();
                let mut xm = x.clone();
                xp[(i, j)] += h;
                xm[(i, j)] -= h;
                let fd = (cost.evaluate(&xp) - cost.evaluate(&xm)) / (2.0 * h);
                assert!(
                    (fd - g[(i, j)]).abs() < 1e-5,
                    "entry ({i},{j}): fd={fd} analytic={}",
                    g[(i, j)]
                );
            }
        }
    }

    #[test]
    fn gradient_is_horizontal() {
        let secants = simplex_secants();
        let x = tilted_plane();
        let g = SecantCost::new(&secants).gradient(&x).unwrap();
        assert!((x.transpose() * g).norm() < 1e-10);
    }

    #[test]
    fn multi_set_weights_sets_equally() {
        let v = |xs: &[f64]| DVector::from_column_slice(xs);
        let small = SecantSet::from_vectors(3, vec![v(&[1.0, 0.0, 0.0])]).unwrap();
        let large = SecantSet::from_vectors(
            3,
            vec![v(&[0.0, 2.0, 0.0]), v(&[0.0, 4.0, 0.0]), v(&[0.0, 0.5, 0.0])],
        )
        .unwrap();
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let sets = [small.clone(), large.clone()];
        let multi = SecantCostMulti::new(&sets).evaluate(&x);
        let a = SecantCost::new(&small).evaluate(&x);
        let b = SecantCost::new(&large).evaluate(&x);
        assert!((multi - 0.5 * (a + b)).abs() < 1e-12);
    }

    #[test]
    fn multi_set_gradient_is_mean_of_horizontal_gradients() {
        let v = |xs: &[f64]| DVector::from_column_slice(xs);
        let a = simplex_secants();
        let b = SecantSet::from_vectors(
            3,
            vec![v(&[0.3, -1.0, 0.4]), v(&[2.0, 0.5, 1.0]), v(&[-0.2, 0.1, 1.5])],
        )
        .unwrap();
        let x = tilted_plane();
        let ga = SecantCost::new(&a).gradient(&x).unwrap();
        let gb = SecantCost::new(&b).gradient(&x).unwrap();
        let sets = [a, b];
        let g = SecantCostMulti::new(&sets).gradient(&x).unwrap();
        assert!((&g - (ga + gb) * 0.5).norm() < 1e-12);
        assert!((x.transpose() * &g).norm() < 1e-10);
    }

    #[test]
    fn empty_inputs_have_unit_cost_and_zero_gradient() {
        let x = tilted_plane();
        let empty = SecantSet::default();
        assert_eq!(SecantCost::new(&empty).evaluate(&x), 1.0);
        assert_eq!(SecantCostMulti::new(&[]).evaluate(&x), 1.0);
        assert_eq!(SecantCostMulti::new(&[]).gradient(&x).unwrap().norm(), 0.0);
    }
}
