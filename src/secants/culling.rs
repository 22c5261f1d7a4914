//! Angle-based deduplication of near-parallel secants.
//!
//! Secants are visited in their original order. Each one is compared, sign
//! free, against the representatives retained so far; the first
//! representative within the threshold absorbs its weight, otherwise the
//! secant becomes a new representative. The outcome is deterministic but
//! depends on input order (first-seen direction wins).
//!
//! The test runs on `|cos|` against `cos(threshold)` with a tiny slack, so
//! exact duplicates and sign-flipped copies merge even at 0°.
//!
//! Complexity is O(k·r) for k input secants and r retained representatives,
//! O(k²) in the worst case.

use super::SecantSet;
use crate::angle::{abs_cos_unit, dirless_cos_threshold};
use log::debug;
use nalgebra::DVector;

pub(super) fn cull_degrees(set: &SecantSet, threshold_deg: f64) -> SecantSet {
    let cos_min = dirless_cos_threshold(threshold_deg);
    let mut kept: Vec<DVector<f64>> = Vec::new();
    let mut units: Vec<DVector<f64>> = Vec::new();
    let mut weights: Vec<u64> = Vec::new();

    for (secant, weight) in set.iter() {
        let unit = secant.normalize();
        let existing = units
            .iter()
            .position(|rep| abs_cos_unit(rep, &unit) >= cos_min);
        match existing {
            Some(idx) => weights[idx] += weight,
            None => {
                kept.push(secant.clone());
                units.push(unit);
                weights.push(weight);
            }
        }
    }

    debug!(
        "Culling: {} secants -> {} representatives at {:.2} deg",
        set.len(),
        kept.len(),
        threshold_deg
    );

    SecantSet {
        dimension: set.dimension,
        secants: kept,
        weights: Some(weights),
    }
}

#[cfg(test)]
mod tests {
    use crate::secants::SecantSet;
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

    #[test]
    fn zero_threshold_keeps_distinct_directions() {
        let set = simplex_secants();
        let culled = set.cull_degrees(0.0);
        assert_eq!(culled.len(), set.len());
        assert!(culled.weights().unwrap().iter().all(|&w| w == 1));
        assert_eq!(culled.total_weight(), 6);
    }

    #[test]
    fn straight_angle_collapses_to_one_representative() {
        let set = simplex_secants();
        let culled = set.cull_degrees(180.0);
        assert_eq!(culled.len(), 1);
        assert_eq!(culled.weight(0), set.len() as u64);
        assert_eq!(culled.secant(0), set.secant(0));
    }

    #[test]
    fn antiparallel_secants_merge_into_first_seen() {
        let v = |xs: &[f64]| DVector::from_column_slice(xs);
        let set = SecantSet::from_vectors(
            2,
            vec![v(&[1.0, 0.0]), v(&[0.0, 1.0]), v(&[-2.0, 0.01]), v(&[0.02, -3.0])],
        )
        .unwrap();
        let culled = set.cull_degrees(5.0);
        assert_eq!(culled.len(), 2);
        assert_eq!(culled.secant(0).as_slice(), &[1.0, 0.0]);
        assert_eq!(culled.secant(1).as_slice(), &[0.0, 1.0]);
        assert_eq!(culled.weights().unwrap(), &[2, 2]);
    }

    #[test]
    fn duplicates_and_sign_flips_merge_at_zero_threshold() {
        for k in 1..200 {
            let k = k as f64;
            let v = DVector::from_column_slice(&[0.37 * k, k - 1.3, 0.11 * k * k, 2.0]);
            let set = SecantSet::from_vectors(4, vec![v.clone(), v.clone(), -&v]).unwrap();
            let culled = set.cull_degrees(0.0);
            assert_eq!(culled.len(), 1, "k={k}");
            assert_eq!(culled.weight(0), 3);
            assert_eq!(culled.secant(0), &v);
        }
    }

    #[test]
    fn culling_weighted_input_preserves_total_weight() {
        let v = |xs: &[f64]| DVector::from_column_slice(xs);
        let set = SecantSet::from_weighted(
            2,
            vec![v(&[1.0, 0.0]), v(&[1.0, 0.001]), v(&[0.0, 1.0])],
            vec![3, 4, 5],
        )
        .unwrap();
        let culled = set.cull_degrees(1.0);
        assert_eq!(culled.len(), 2);
        assert_eq!(culled.total_weight(), 12);
        assert_eq!(culled.weights().unwrap(), &[7, 5]);
    }
}
