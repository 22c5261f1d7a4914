//! Secant sets: pairwise difference vectors of a point cloud.
//!
//! A secant is the difference `p_j - p_i` between two samples. Only its
//! direction and length matter to the projection cost, and the sign is
//! irrelevant (`s` and `-s` project to the same length), so a set of `m`
//! points yields at most `m(m-1)/2` secants, taken in `i < j` order.
//!
//! After culling (see [`SecantSet::cull_degrees`]) a set carries integer
//! weights: each retained representative counts how many original secants it
//! stands for, and the weights always sum to the original secant count.
//!
//! Notes
//! - Pairs of coincident points produce a zero vector with no direction. They
//!   would make every projection degenerate, so they are dropped at
//!   construction and reported through `log`.
//! - Weights are `u64`; normalizers are accumulated as `f64` by the cost.
//!
//! See also
//! - `crate::cost` for the secant-preservation objective.
//! - [`compute_secants`] / [`cull_secants`] for the per-data-set fan-out.

mod batch;
mod culling;

pub use batch::{compute_secants, cull_secants};

use crate::types::DataSet;
use log::{debug, warn};
use nalgebra::DVector;

/// Difference vectors of a point cloud, optionally weighted after culling.
#[derive(Clone, Debug, Default)]
pub struct SecantSet {
    dimension: usize,
    secants: Vec<DVector<f64>>,
    weights: Option<Vec<u64>>,
}

impl SecantSet {
    /// All pairwise differences `p_j - p_i` for `i < j`.
    pub fn from_points(data: &DataSet) -> Self {
        let points = data.points();
        let m = points.len();
        let mut secants = Vec::with_capacity(m * m.saturating_sub(1) / 2);
        let mut coincident = 0usize;
        for i in 0..m {
            for j in (i + 1)..m {
                let s = &points[j] - &points[i];
                if s.norm() > 0.0 {
                    secants.push(s);
                } else {
                    coincident += 1;
                }
            }
        }
        if coincident > 0 {
            warn!("SecantSet: skipped {coincident} zero secants from coincident points");
        }
        debug!("SecantSet: {} points -> {} secants", m, secants.len());
        Self {
            dimension: data.dimension(),
            secants,
            weights: None,
        }
    }

    /// Unweighted set from explicit secant vectors. Zero vectors are dropped.
    pub fn from_vectors(dimension: usize, secants: Vec<DVector<f64>>) -> Result<Self, String> {
        check_dimensions(dimension, &secants)?;
        Ok(Self {
            dimension,
            secants: secants.into_iter().filter(|s| s.norm() > 0.0).collect(),
            weights: None,
        })
    }

    /// Weighted set from explicit representatives and their weights.
    pub fn from_weighted(
        dimension: usize,
        secants: Vec<DVector<f64>>,
        weights: Vec<u64>,
    ) -> Result<Self, String> {
        check_dimensions(dimension, &secants)?;
        if secants.len() != weights.len() {
            return Err(format!(
                "Got {} weights for {} secants",
                weights.len(),
                secants.len()
            ));
        }
        let (secants, weights) = secants
            .into_iter()
            .zip(weights)
            .filter(|(s, w)| s.norm() > 0.0 && *w > 0)
            .unzip();
        Ok(Self {
            dimension,
            secants,
            weights: Some(weights),
        })
    }

    /// Copy of the set with every secant scaled to unit length.
    pub fn normalized(&self) -> Self {
        Self {
            dimension: self.dimension,
            secants: self.secants.iter().map(|s| s.normalize()).collect(),
            weights: self.weights.clone(),
        }
    }

    /// Merges near-parallel secants; see the `culling` module.
    pub fn cull_degrees(&self, threshold_deg: f64) -> Self {
        culling::cull_degrees(self, threshold_deg)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.secants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secants.is_empty()
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    pub fn secant(&self, j: usize) -> &DVector<f64> {
        &self.secants[j]
    }

    pub fn secants(&self) -> &[DVector<f64>] {
        &self.secants
    }

    pub fn weights(&self) -> Option<&[u64]> {
        self.weights.as_deref()
    }

    /// Weight of secant `j`; 1 for an unweighted set.
    pub fn weight(&self, j: usize) -> u64 {
        self.weights.as_ref().map(|w| w[j]).unwrap_or(1)
    }

    /// Number of original secants this set represents.
    pub fn total_weight(&self) -> u64 {
        match &self.weights {
            Some(w) => w.iter().sum(),
            None => self.secants.len() as u64,
        }
    }

    /// Iterates `(secant, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&DVector<f64>, u64)> + '_ {
        self.secants
            .iter()
            .enumerate()
            .map(move |(j, s)| (s, self.weight(j)))
    }
}

fn check_dimensions(dimension: usize, secants: &[DVector<f64>]) -> Result<(), String> {
    match secants.iter().position(|s| s.len() != dimension) {
        Some(idx) => Err(format!(
            "Secant {idx} has dimension {} but the set expects {dimension}",
            secants[idx].len()
        )),
        None => Ok(()),
    }
}
