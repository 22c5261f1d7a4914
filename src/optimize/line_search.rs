//! Derivative-based line search along a geodesic.
//!
//! The search works on the one-dimensional restriction `φ(t) = f(γ(t))`
//! together with its slope `φ'(t) = ⟨grad f(γ(t)), τγ'(t)⟩`:
//!
//! 1. Bracketing: starting from the step accepted last time, the trial step
//!    grows geometrically while the cost keeps falling and the slope stays
//!    negative. The first trial that rises, turns upward, or is infeasible
//!    closes the bracket.
//! 2. Zoom: the bracket shrinks by safeguarded secant steps on the slope
//!    (bisection when the slope is unusable) until the slope has dropped to a
//!    fraction of its initial magnitude.
//!
//! Evaluators return `None` for infeasible trials (non-finite cost or a
//! degenerate gradient); such trials act as an upper bracket end. The best
//! feasible trial is accepted only when it is strictly below `φ(0)`.

/// Tuning knobs for [`LineSearch`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSearchParams {
    /// Maximum number of bracket expansions.
    pub max_expansions: usize,
    /// Maximum number of zoom iterations once a bracket is found.
    pub max_refinements: usize,
    /// Growth factor applied while bracketing.
    pub expansion: f64,
    /// Stop once `|φ'(t)| <= slope_tol * |φ'(0)|`.
    pub slope_tol: f64,
    /// Lower bound on the initial trial step.
    pub min_alpha: f64,
}

impl Default for LineSearchParams {
    fn default() -> Self {
        Self {
            max_expansions: 24,
            max_refinements: 40,
            expansion: 2.0,
            slope_tol: 0.1,
            min_alpha: 1e-12,
        }
    }
}

/// Outcome of one [`LineSearch::search`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSearchResult {
    pub accepted: bool,
    pub alpha: f64,
    /// `φ(alpha)` for an accepted step, `φ(0)` otherwise.
    pub value: f64,
}

/// Line search state; `alpha` persists between searches as the next seed.
#[derive(Clone, Debug, Default)]
pub struct LineSearch {
    pub params: LineSearchParams,
    /// Last accepted step size, used to seed the next search.
    pub alpha: f64,
    /// `φ(0)` of the most recent search.
    pub s0: f64,
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    t: f64,
    f: f64,
    d: f64,
}

impl LineSearch {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ..Default::default()
        }
    }

    pub fn with_params(alpha: f64, params: LineSearchParams) -> Self {
        Self {
            params,
            alpha,
            s0: 0.0,
        }
    }

    /// Searches for a step `t > 0` with `φ(t) < φ(0)`.
    ///
    /// On success `alpha` is updated to the accepted step. On failure the
    /// result has `accepted == false` and `alpha == 0`.
    pub fn search(
        &mut self,
        phi: &mut dyn FnMut(f64) -> Option<f64>,
        dphi: &mut dyn FnMut(f64) -> Option<f64>,
    ) -> LineSearchResult {
        let rejected = |value| LineSearchResult {
            accepted: false,
            alpha: 0.0,
            value,
        };

        let Some(s0) = phi(0.0) else {
            return rejected(f64::INFINITY);
        };
        self.s0 = s0;
        let d0 = match dphi(0.0) {
            Some(d) if d < 0.0 => d,
            _ => return rejected(s0),
        };
        let slope_limit = self.params.slope_tol * d0.abs();

        let mut lo = Sample {
            t: 0.0,
            f: s0,
            d: d0,
        };
        let mut best = lo;
        let mut hi: Option<Sample> = None;
        let mut t = self.alpha.max(self.params.min_alpha);

        for _ in 0..self.params.max_expansions {
            let s = sample(phi, dphi, t);
            if s.f < best.f {
                best = s;
            }
            if !s.f.is_finite() || s.f > lo.f || s.d >= 0.0 {
                hi = Some(s);
                break;
            }
            if s.d.abs() <= slope_limit {
                return self.finish(best, s0);
            }
            lo = s;
            t *= self.params.expansion;
        }

        if let Some(mut hi) = hi {
            for _ in 0..self.params.max_refinements {
                let width = hi.t - lo.t;
                if width <= f64::EPSILON * hi.t.max(1.0) {
                    break;
                }
                let trial = if hi.d.is_finite() && hi.d > 0.0 {
                    lo.t - lo.d * width / (hi.d - lo.d)
                } else {
                    lo.t + 0.5 * width
                };
                let trial = trial.clamp(lo.t + 0.1 * width, hi.t - 0.1 * width);

                let s = sample(phi, dphi, trial);
                if s.f < best.f {
                    best = s;
                }
                if !s.f.is_finite() || s.f > lo.f || s.d >= 0.0 {
                    hi = s;
                } else {
                    lo = s;
                }
                if s.f.is_finite() && s.f <= best.f && s.d.abs() <= slope_limit {
                    break;
                }
            }
        }

        self.finish(best, s0)
    }

    fn finish(&mut self, best: Sample, s0: f64) -> LineSearchResult {
        if best.t > 0.0 && best.f < s0 {
            self.alpha = best.t;
            LineSearchResult {
                accepted: true,
                alpha: best.t,
                value: best.f,
            }
        } else {
            LineSearchResult {
                accepted: false,
                alpha: 0.0,
                value: s0,
            }
        }
    }
}

fn sample(
    phi: &mut dyn FnMut(f64) -> Option<f64>,
    dphi: &mut dyn FnMut(f64) -> Option<f64>,
    t: f64,
) -> Sample {
    match phi(t).filter(|f| f.is_finite()) {
        Some(f) => Sample {
            t,
            f,
            d: dphi(t).filter(|d| d.is_finite()).unwrap_or(f64::INFINITY),
        },
        None => Sample {
            t,
            f: f64::INFINITY,
            d: f64::INFINITY,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_quadratic_minimum() {
        let mut ls = LineSearch::new(1.0);
        let res = ls.search(
            &mut |t| Some((t - 3.0) * (t - 3.0)),
            &mut |t| Some(2.0 * (t - 3.0)),
        );
        assert!(res.accepted);
        assert!((res.alpha - 3.0).abs() < 1e-6, "alpha={}", res.alpha);
        assert_eq!(ls.alpha, res.alpha);
        assert_eq!(ls.s0, 9.0);
    }

    #[test]
    fn shrinks_a_seed_that_overshoots() {
        let mut ls = LineSearch::new(100.0);
        let res = ls.search(
            &mut |t| Some((t - 0.5) * (t - 0.5)),
            &mut |t| Some(2.0 * (t - 0.5)),
        );
        assert!(res.accepted);
        assert!(res.value < 0.25);
        assert!((res.alpha - 0.5).abs() < 0.05, "alpha={}", res.alpha);
    }

    #[test]
    fn rejects_non_descent_direction() {
        let mut ls = LineSearch::new(1.0);
        let res = ls.search(&mut |t| Some(t * t + 1.0), &mut |t| Some(2.0 * t + 1.0));
        assert!(!res.accepted);
        assert_eq!(res.alpha, 0.0);
        assert_eq!(ls.alpha, 1.0);
    }

    #[test]
    fn treats_infeasible_trials_as_upper_bound() {
        let mut ls = LineSearch::new(4.0);
        let res = ls.search(
            &mut |t| (t < 1.5).then(|| (t - 5.0) * (t - 5.0)),
            &mut |t| (t < 1.5).then(|| 2.0 * (t - 5.0)),
        );
        assert!(res.accepted);
        assert!(res.alpha > 0.0 && res.alpha < 1.5, "alpha={}", res.alpha);
        assert!(res.value < 25.0);
    }

    #[test]
    fn never_accepts_a_worse_point() {
        let mut ls = LineSearch::new(1.0);
        // Descent slope at zero but every positive step is worse.
        let res = ls.search(
            &mut |t| Some(if t == 0.0 { 0.0 } else { 1.0 }),
            &mut |t| Some(if t == 0.0 { -1.0 } else { 1.0 }),
        );
        assert!(!res.accepted);
        assert_eq!(res.value, 0.0);
    }
}
