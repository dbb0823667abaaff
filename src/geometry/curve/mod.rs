mod bezier;
mod bspline;

pub use bezier::BezierCurve;
pub use bspline::BSplineCurve;
pub(crate) use bspline::{basis_functions, find_span, top_derivative_on_span};

use crate::error::{GeometryError, Result};
use crate::math::{linspace, Point3};

use super::CoordinateSeries;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// The unit domain `[0, 1]` shared by every curve in this crate.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Fails if `t` lies outside the domain.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for `t` outside `[t_min, t_max]`
    /// or NaN.
    pub fn check(&self, t: f64) -> Result<()> {
        if !(self.t_min..=self.t_max).contains(&t) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into());
        }
        Ok(())
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Samples the curve at `n` uniformly spaced parameters across its domain.
    ///
    /// # Errors
    ///
    /// Returns an error if any evaluation fails.
    fn sample(&self, n: usize) -> Result<CoordinateSeries> {
        let domain = self.domain();
        linspace(domain.t_min, domain.t_max, n)
            .into_iter()
            .map(|t| self.evaluate(t))
            .collect()
    }
}
