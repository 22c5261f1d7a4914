use crate::types::Projection;
use nalgebra::DMatrix;

/// Picks `d` distinct axes in order of decreasing spread.
///
/// Ties go to the lowest index. Non-finite spreads rank last.
pub(super) fn largest_spread_axes(spread: &[f64], d: usize) -> Result<Vec<usize>, String> {
    let n = spread.len();
    if d == 0 || d > n {
        return Err(format!(
            "Target dimension {d} must lie in 1..={n} for data in R^{n}"
        ));
    }
    let rank = |v: f64| if v.is_finite() { v } else { f64::NEG_INFINITY };
    let mut taken = vec![false; n];
    let mut axes = Vec::with_capacity(d);
    for _ in 0..d {
        let mut best: Option<usize> = None;
        for i in (0..n).filter(|&i| !taken[i]) {
            match best {
                Some(b) if rank(spread[i]) <= rank(spread[b]) => {}
                _ => best = Some(i),
            }
        }
        let Some(axis) = best else { break };
        taken[axis] = true;
        axes.push(axis);
    }
    Ok(axes)
}

/// n×d frame whose column `k` is the standard basis vector `e_{axes[k]}`.
pub(super) fn axis_frame(n: usize, axes: &[usize]) -> Projection {
    let mut w = DMatrix::zeros(n, axes.len());
    for (col, &axis) in axes.iter().enumerate() {
        w[(axis, col)] = 1.0;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_spread() {
        let axes = largest_spread_axes(&[1.0, 5.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(axes, vec![1, 3, 2]);
    }

    #[test]
    fn ties_prefer_lowest_index_and_never_repeat() {
        let axes = largest_spread_axes(&[2.0, 2.0, 2.0], 3).unwrap();
        assert_eq!(axes, vec![0, 1, 2]);
    }

    #[test]
    fn non_finite_spread_ranks_last() {
        let axes = largest_spread_axes(&[f64::NAN, 0.0, 1.0], 2).unwrap();
        assert_eq!(axes, vec![2, 1]);
    }

    #[test]
    fn rejects_out_of_range_dimension() {
        assert!(largest_spread_axes(&[1.0, 2.0], 0).is_err());
        assert!(largest_spread_axes(&[1.0, 2.0], 3).is_err());
    }

    #[test]
    fn frame_places_unit_entries() {
        let w = axis_frame(4, &[2, 0]);
        assert_eq!(w.shape(), (4, 2));
        assert_eq!(w[(2, 0)], 1.0);
        assert_eq!(w[(0, 1)], 1.0);
        assert_eq!(w.sum(), 2.0);
    }
}
