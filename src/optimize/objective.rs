use crate::manifold::Manifold;

/// Objective function to be minimized over a manifold.
pub trait Objective<M: Manifold> {
    /// Function value f(x). Non-finite values mark infeasible points.
    fn value(&self, x: &M::Point) -> f64;

    /// Riemannian gradient at x, or `None` when x is a degenerate point.
    fn gradient(&self, x: &M::Point) -> Option<M::Tangent>;
}

/// Adapter turning a pair of closures into an [`Objective`].
pub struct FnObjective<F, G> {
    value_fn: F,
    grad_fn: G,
}

impl<F, G> FnObjective<F, G> {
    pub fn new(value_fn: F, grad_fn: G) -> Self {
        Self { value_fn, grad_fn }
    }
}

impl<M, F, G> Objective<M> for FnObjective<F, G>
where
    M: Manifold,
    F: Fn(&M::Point) -> f64,
    G: Fn(&M::Point) -> Option<M::Tangent>,
{
    fn value(&self, x: &M::Point) -> f64 {
        (self.value_fn)(x)
    }

    fn gradient(&self, x: &M::Point) -> Option<M::Tangent> {
        (self.grad_fn)(x)
    }
}
