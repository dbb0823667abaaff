use nalgebra::DMatrix;

use crate::error::{InputError, Result};
use crate::geometry::CoordinateSeries;
use crate::math::{bernstein_weight, linspace, Point3, Vector3};

use super::{Curve, CurveDomain};

/// A Bezier curve of arbitrary degree.
///
/// With control points `P_0..P_d`:
/// `B(t) = sum_j bernstein_weight(d - j, d, t) * P_j`, so `B(0) = P_0` and
/// `B(1) = P_d`. Interior control points pull the curve without lying on it.
#[derive(Debug, Clone)]
pub struct BezierCurve {
    control_points: Vec<Point3>,
}

impl BezierCurve {
    /// Creates a Bezier curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are given or a coordinate is
    /// not finite.
    pub fn new(control_points: Vec<Point3>) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(InputError::TooFewPoints {
                required: 2,
                actual: control_points.len(),
            }
            .into());
        }
        if !control_points
            .iter()
            .all(|p| p.iter().all(|c| c.is_finite()))
        {
            return Err(InputError::NonFinite("control point coordinate").into());
        }
        Ok(Self { control_points })
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Polynomial degree (`control points - 1`).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    /// Weight of control point `j` at `t`.
    fn weight(&self, j: usize, t: f64) -> f64 {
        let d = self.degree();
        bernstein_weight(d - j, d, t)
    }
}

impl Curve for BezierCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        let blended = self
            .control_points
            .iter()
            .enumerate()
            .fold(Vector3::zeros(), |acc, (j, p)| {
                acc + p.coords * self.weight(j, t)
            });
        Ok(Point3::from(blended))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    /// Samples the whole grid as one product of the `3 x P` coordinate matrix
    /// with the `P x n` Bernstein basis matrix.
    fn sample(&self, n: usize) -> Result<CoordinateSeries> {
        let grid = linspace(0.0, 1.0, n);
        let pts = &self.control_points;

        let coords = DMatrix::from_fn(3, pts.len(), |axis, j| pts[j][axis]);
        let basis = DMatrix::from_fn(pts.len(), grid.len(), |j, s| self.weight(j, grid[s]));
        let blended = coords * basis;

        let axis = |r: usize| blended.row(r).iter().copied().collect::<Vec<f64>>();
        CoordinateSeries::from_axes(axis(0), axis(1), axis(2))
    }
}
