use super::{Geodesic, Manifold};
use nalgebra::DVector;

/// Flat R^n: straight-line geodesics, identity transport, dot-product metric.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl Manifold for Euclidean {
    type Point = DVector<f64>;
    type Tangent = DVector<f64>;
    type Geodesic = EuclideanGeodesic;

    fn geodesic(&self, x: &DVector<f64>, velocity: DVector<f64>) -> EuclideanGeodesic {
        EuclideanGeodesic {
            x: x.clone(),
            velocity,
        }
    }

    fn inner_product(&self, _x: &DVector<f64>, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        a.dot(b)
    }

    fn scale(&self, v: &DVector<f64>, alpha: f64) -> DVector<f64> {
        v * alpha
    }

    fn combine(&self, a: f64, u: &DVector<f64>, b: f64, v: &DVector<f64>) -> DVector<f64> {
        u * a + v * b
    }
}

#[derive(Clone, Debug)]
pub struct EuclideanGeodesic {
    x: DVector<f64>,
    velocity: DVector<f64>,
}

impl Geodesic for EuclideanGeodesic {
    type Point = DVector<f64>;
    type Tangent = DVector<f64>;

    fn origin(&self) -> &DVector<f64> {
        &self.x
    }

    fn velocity(&self) -> &DVector<f64> {
        &self.velocity
    }

    fn evaluate(&self, t: f64) -> DVector<f64> {
        &self.x + &self.velocity * t
    }

    fn parallel_translate(&self, v: &DVector<f64>, _t: f64) -> DVector<f64> {
        v.clone()
    }
}
