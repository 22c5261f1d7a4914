use super::SecantSet;
use crate::types::DataSystem;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds one secant set per data set of the system.
///
/// Sets are independent, so with the `parallel` feature they are computed on
/// the rayon pool. Output order follows the input order.
pub fn compute_secants(system: &DataSystem) -> Vec<SecantSet> {
    #[cfg(feature = "parallel")]
    {
        system
            .data_sets()
            .par_iter()
            .map(SecantSet::from_points)
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        system
            .data_sets()
            .iter()
            .map(SecantSet::from_points)
            .collect()
    }
}

/// Culls every set independently with the same angular threshold.
pub fn cull_secants(sets: &[SecantSet], threshold_deg: f64) -> Vec<SecantSet> {
    #[cfg(feature = "parallel")]
    {
        sets.par_iter()
            .map(|s| s.cull_degrees(threshold_deg))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        sets.iter().map(|s| s.cull_degrees(threshold_deg)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataSet;

    #[test]
    fn one_set_per_parameter_in_order() {
        let a = DataSet::from_rows(&[&[0.0, 0.0], &[1.0, 0.0]]).unwrap();
        let b = DataSet::from_rows(&[&[0.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]]).unwrap();
        let system = DataSystem::new(vec![0.5, 1.5], vec![a, b]).unwrap();
        let sets = compute_secants(&system);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].len(), 1);
        assert_eq!(sets[1].len(), 3);

        let culled = cull_secants(&sets, 180.0);
        assert_eq!(culled.iter().map(SecantSet::len).collect::<Vec<_>>(), [1, 1]);
        assert_eq!(culled[1].total_weight(), 3);
    }
}
