use nalgebra::{DMatrix, DVector};
use secant_projection::DataSet;

/// Spanning vectors of a tilted plane in R^3 and its unit normal.
pub fn tilted_plane() -> (DVector<f64>, DVector<f64>, DVector<f64>) {
    let u = DVector::from_column_slice(&[1.0, 0.5, 0.3]);
    let v = DVector::from_column_slice(&[0.2, 1.0, -0.4]);
    let normal = u.cross(&v).normalize();
    (u, v, normal)
}

/// Points `a u + b v` on an irregular grid inside the tilted plane.
pub fn planar_cloud(count: usize) -> DataSet {
    let (u, v, _) = tilted_plane();
    let points = (0..count)
        .map(|k| {
            let t = k as f64;
            let a = (0.7 * t).sin() * (1.0 + 0.1 * t);
            let b = (1.3 * t + 0.4).cos();
            &u * a + &v * b
        })
        .collect();
    DataSet::new(points).expect("points share a dimension")
}

/// Helix in R^3 embedded in R^n by a fixed orthonormal frame, plus a small
/// deterministic off-helix wobble in the remaining directions.
pub fn embedded_helix(dimension: usize, count: usize, wobble: f64) -> DataSet {
    assert!(dimension >= 3, "helix needs at least three dimensions");
    let seed = DMatrix::from_fn(dimension, dimension, |i, j| {
        ((i * 7 + j * 3) as f64 * 0.61).sin() + if i == j { 2.0 } else { 0.0 }
    });
    let frame = seed.qr().q();
    let points = (0..count)
        .map(|k| {
            let t = 4.0 * std::f64::consts::PI * k as f64 / count as f64;
            let mut p = frame.column(0) * t.cos()
                + frame.column(1) * t.sin()
                + frame.column(2) * (0.3 * t);
            for j in 3..dimension {
                p += frame.column(j) * (wobble * ((j as f64 + 1.0) * t).sin());
            }
            p
        })
        .collect();
    DataSet::new(points).expect("points share a dimension")
}

pub fn orthonormality_error(w: &DMatrix<f64>) -> f64 {
    (w.transpose() * w - DMatrix::identity(w.ncols(), w.ncols())).norm()
}
