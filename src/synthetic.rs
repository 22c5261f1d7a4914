//! Deterministic point clouds for demos and tests.
//!
//! `limit_cycle_family` samples one closed curve per parameter value. Each
//! curve is a truncated Fourier series in a latent space of `2 * harmonics`
//! coordinates whose amplitudes and phases depend on the parameter; a fixed
//! linear map embeds the latent points into R^n. No dynamics are integrated.

use crate::types::{DataSet, DataSystem};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::TAU;

/// Samples `points` equally spaced phases of one closed curve per parameter.
pub fn limit_cycle_family(
    dimension: usize,
    parameters: &[f64],
    points: usize,
    harmonics: usize,
) -> Result<DataSystem, String> {
    if dimension == 0 || points == 0 || harmonics == 0 {
        return Err(format!(
            "Synthetic family needs positive dimension, points and harmonics \
             (got {dimension}, {points}, {harmonics})"
        ));
    }
    let embed = embedding(dimension, 2 * harmonics);
    let sets = parameters
        .iter()
        .map(|&mu| {
            let pts = (0..points)
                .map(|k| {
                    let theta = TAU * k as f64 / points as f64;
                    &embed * latent_point(mu, theta, harmonics)
                })
                .collect();
            DataSet::new(pts)
        })
        .collect::<Result<Vec<_>, _>>()?;
    DataSystem::new(parameters.to_vec(), sets)
}

fn latent_point(mu: f64, theta: f64, harmonics: usize) -> DVector<f64> {
    let mut z = DVector::zeros(2 * harmonics);
    for h in 1..=harmonics {
        let hf = h as f64;
        let amp = if h == 1 {
            1.0 + 0.5 * mu
        } else {
            (0.2 + 0.3 * mu) / (hf * hf)
        };
        let phase = hf * theta + 0.25 * mu * (hf - 1.0);
        z[2 * (h - 1)] = amp * phase.cos();
        z[2 * (h - 1) + 1] = amp * phase.sin();
    }
    z
}

/// Fixed full-rank-ish embedding with entries in [-1, 1].
fn embedding(rows: usize, cols: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows, cols, |i, j| {
        let (i, j) = ((i + 1) as f64, (j + 1) as f64);
        (0.9 * i * j + 0.37 * j).cos()
    })
}
