use super::line_search::LineSearch;
use super::objective::{FnObjective, Objective};
use super::types::{ConjugateRule, OptimizeOutcome, OptimizeResult, StepRecord};
use crate::manifold::{Geodesic, Manifold};
use log::{debug, warn};

/// Seed used when the line search has no positive step size yet.
const DEFAULT_ALPHA: f64 = 1e-2;

/// Outcome of a single [`ConjugateGradient::step`].
#[derive(Clone, Debug)]
pub enum StepOutcome {
    /// The point moved along the geodesic.
    Moved(StepRecord),
    /// No improving step was found along the search direction.
    Stalled,
    /// The gradient is undefined at the current point.
    Degenerate,
}

/// Geodesic and gradient from the previous accepted step.
struct Previous<M: Manifold> {
    geodesic: M::Geodesic,
    grad: M::Tangent,
}

/// Riemannian nonlinear conjugate gradient on a [`Manifold`].
pub struct ConjugateGradient<M: Manifold> {
    pub manifold: M,
    pub rule: ConjugateRule,
    pub max_steps: usize,
    pub line_search: LineSearch,
    /// If true, stores per-step records into the result.
    pub collect_trace: bool,
    n: usize,
    previous: Option<Previous<M>>,
}

impl<M: Manifold> ConjugateGradient<M> {
    pub fn new(manifold: M) -> Self {
        Self {
            manifold,
            rule: ConjugateRule::default(),
            max_steps: 1000,
            line_search: LineSearch::default(),
            collect_trace: false,
            n: 0,
            previous: None,
        }
    }

    pub fn with_rule(mut self, rule: ConjugateRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Seeds the line search step size.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.line_search.alpha = alpha;
        self
    }

    pub fn with_trace(mut self, collect_trace: bool) -> Self {
        self.collect_trace = collect_trace;
        self
    }

    /// Accepted steps since the last reset.
    pub fn steps_taken(&self) -> usize {
        self.n
    }

    /// Forgets the previous direction; the next step is steepest descent.
    pub fn reset(&mut self) {
        self.n = 0;
        self.previous = None;
    }

    /// Performs one conjugate-gradient step, moving `x` when the cost drops.
    pub fn step<O: Objective<M>>(&mut self, x: &mut M::Point, objective: &O) -> StepOutcome {
        let Some(grad) = objective.gradient(x) else {
            return StepOutcome::Degenerate;
        };
        let grad_norm = self.manifold.norm2(x, &grad).sqrt();

        let mut direction = self.manifold.scale(&grad, -1.0);
        let mut beta = 0.0;
        if self.n > 0 {
            if let Some(prev) = &self.previous {
                let b = self.modifier(x, &grad, prev);
                if b.is_finite() && b != 0.0 {
                    let transported = prev
                        .geodesic
                        .parallel_translate(prev.geodesic.velocity(), self.line_search.alpha);
                    direction = self.manifold.combine(-1.0, &grad, b, &transported);
                    beta = b;
                }
            }
        }

        let mut restarted = false;
        if beta != 0.0 && !(self.manifold.inner_product(x, &grad, &direction) < 0.0) {
            debug!("CG: conjugate direction is not descending, restarting");
            direction = self.manifold.scale(&grad, -1.0);
            beta = 0.0;
            restarted = true;
        }

        let geodesic = self.manifold.geodesic(x, direction);
        let result = {
            let manifold = &self.manifold;
            let geo = &geodesic;
            let mut phi = |t: f64| {
                let v = objective.value(&geo.evaluate(t));
                v.is_finite().then_some(v)
            };
            let mut dphi = |t: f64| {
                let xt = geo.evaluate(t);
                let g = objective.gradient(&xt)?;
                let v = geo.parallel_translate(geo.velocity(), t);
                let d = manifold.inner_product(&xt, &g, &v);
                d.is_finite().then_some(d)
            };
            self.line_search.search(&mut phi, &mut dphi)
        };

        if !result.accepted || result.alpha <= 0.0 {
            return StepOutcome::Stalled;
        }

        *x = geodesic.evaluate(result.alpha);
        self.previous = Some(Previous { geodesic, grad });
        self.n += 1;

        StepOutcome::Moved(StepRecord {
            step: self.n,
            cost: result.value,
            alpha: result.alpha,
            beta,
            grad_norm,
            restarted,
        })
    }

    /// Runs up to `max_steps` steps from `x`.
    ///
    /// Stops early with [`OptimizeOutcome::Converged`] when a step finds no
    /// improving direction.
    pub fn optimize<O: Objective<M>>(
        &mut self,
        x: M::Point,
        objective: &O,
    ) -> OptimizeResult<M::Point> {
        self.reset();
        if !(self.line_search.alpha > 0.0) {
            self.line_search.alpha = DEFAULT_ALPHA;
        }

        let mut x = x;
        let initial_cost = objective.value(&x);
        let mut cost = initial_cost;
        let mut trace = self.collect_trace.then(Vec::new);
        let mut outcome = OptimizeOutcome::MaxStepsReached;

        for _ in 0..self.max_steps {
            match self.step(&mut x, objective) {
                StepOutcome::Moved(record) => {
                    debug!(
                        "CG: step {:>5} | cost {:>13.6e} | alpha {:>9.3e} | beta {:>+9.3e} | grad {:>9.3e}",
                        record.step, record.cost, record.alpha, record.beta, record.grad_norm
                    );
                    cost = record.cost;
                    if let Some(trace) = trace.as_mut() {
                        trace.push(record);
                    }
                }
                StepOutcome::Stalled => {
                    outcome = OptimizeOutcome::Converged;
                    break;
                }
                StepOutcome::Degenerate => {
                    warn!("CG: gradient undefined at the current point, stopping");
                    outcome = OptimizeOutcome::Degenerate;
                    break;
                }
            }
        }

        OptimizeResult {
            x,
            outcome,
            steps: self.n,
            initial_cost,
            cost,
            trace,
        }
    }

    /// Runs [`optimize`](Self::optimize) on a pair of closures.
    pub fn optimize_with_fn<F, G>(
        &mut self,
        x: M::Point,
        value_fn: F,
        grad_fn: G,
    ) -> OptimizeResult<M::Point>
    where
        F: Fn(&M::Point) -> f64,
        G: Fn(&M::Point) -> Option<M::Tangent>,
    {
        let objective = FnObjective::new(value_fn, grad_fn);
        self.optimize(x, &objective)
    }

    /// Conjugacy coefficient β for the current gradient.
    fn modifier(&self, x: &M::Point, grad: &M::Tangent, prev: &Previous<M>) -> f64 {
        let m = &self.manifold;
        match self.rule {
            ConjugateRule::FletcherReeves => {
                m.norm2(x, grad) / m.norm2(prev.geodesic.origin(), &prev.grad)
            }
            ConjugateRule::PolakRibiere => {
                let pt = prev
                    .geodesic
                    .parallel_translate(&prev.grad, self.line_search.alpha);
                let diff = m.combine(1.0, grad, -1.0, &pt);
                m.inner_product(x, grad, &diff) / m.norm2(x, &pt)
            }
            ConjugateRule::HestenesStiefel => {
                let pt = prev
                    .geodesic
                    .parallel_translate(&prev.grad, self.line_search.alpha);
                let diff = m.combine(1.0, grad, -1.0, &pt);
                m.inner_product(x, grad, &diff) / m.inner_product(x, &pt, &diff)
            }
        }
    }
}
