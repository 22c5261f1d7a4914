use nalgebra::{DMatrix, DVector};

/// A state-space sample in R^n.
pub type Point = DVector<f64>;

/// An n×d projection with orthonormal columns, i.e. a frame on Gr(n, d).
pub type Projection = DMatrix<f64>;

/// Ordered point cloud sampled from one trajectory (one parameter value).
#[derive(Clone, Debug, Default)]
pub struct DataSet {
    points: Vec<Point>,
}

impl DataSet {
    /// Builds a data set, rejecting points whose dimension differs from the first.
    pub fn new(points: Vec<Point>) -> Result<Self, String> {
        if let Some(first) = points.first() {
            let dim = first.len();
            if let Some(idx) = points.iter().position(|p| p.len() != dim) {
                return Err(format!(
                    "Point {idx} has dimension {} but the data set expects {dim}",
                    points[idx].len()
                ));
            }
        }
        Ok(Self { points })
    }

    /// Convenience constructor from row slices.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self, String> {
        Self::new(rows.iter().map(|r| DVector::from_column_slice(r)).collect())
    }

    /// Ambient dimension, or 0 for an empty set.
    pub fn dimension(&self) -> usize {
        self.points.first().map(|p| p.len()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Per-coordinate `(min, max)` over all points. Empty for an empty set.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        let mut bounds = vec![(f64::INFINITY, f64::NEG_INFINITY); self.dimension()];
        accumulate_bounds(&mut bounds, &self.points);
        bounds
    }
}

/// A family of data sets, one per parameter value, sharing an ambient space.
#[derive(Clone, Debug, Default)]
pub struct DataSystem {
    parameters: Vec<f64>,
    data_sets: Vec<DataSet>,
}

impl DataSystem {
    pub fn new(parameters: Vec<f64>, data_sets: Vec<DataSet>) -> Result<Self, String> {
        if parameters.len() != data_sets.len() {
            return Err(format!(
                "Got {} parameter values for {} data sets",
                parameters.len(),
                data_sets.len()
            ));
        }
        let dim = data_sets
            .iter()
            .find(|s| !s.is_empty())
            .map(DataSet::dimension)
            .unwrap_or(0);
        if let Some(idx) = data_sets
            .iter()
            .position(|s| !s.is_empty() && s.dimension() != dim)
        {
            return Err(format!(
                "Data set {idx} has dimension {} but the system expects {dim}",
                data_sets[idx].dimension()
            ));
        }
        Ok(Self {
            parameters,
            data_sets,
        })
    }

    pub fn dimension(&self) -> usize {
        self.data_sets
            .iter()
            .find(|s| !s.is_empty())
            .map(DataSet::dimension)
            .unwrap_or(0)
    }

    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    pub fn data_sets(&self) -> &[DataSet] {
        &self.data_sets
    }

    pub fn len(&self) -> usize {
        self.data_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_sets.is_empty()
    }

    /// Total number of points across all sets.
    pub fn total_points(&self) -> usize {
        self.data_sets.iter().map(DataSet::len).sum()
    }

    /// Per-coordinate `(min, max)` over the union of all sets.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        let mut bounds = vec![(f64::INFINITY, f64::NEG_INFINITY); self.dimension()];
        for set in &self.data_sets {
            accumulate_bounds(&mut bounds, set.points());
        }
        bounds
    }
}

fn accumulate_bounds(bounds: &mut [(f64, f64)], points: &[Point]) {
    for p in points {
        for (k, b) in bounds.iter_mut().enumerate() {
            let v = p[k];
            b.0 = b.0.min(v);
            b.1 = b.1.max(v);
        }
    }
}
