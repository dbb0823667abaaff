//! Parametric smoothing B-spline fit.
//!
//! Fits one spline per axis over a shared chord-length parameterization. The
//! smoothness `s` bounds the summed squared residual `fp`:
//! - `s = 0` interpolates every point.
//! - Otherwise knots are added until the least-squares spline satisfies
//!   `fp <= s`, then the spline is relaxed toward a single polynomial until
//!   `fp ~= s`.

mod knots;
mod parameterize;
mod solve;

pub use parameterize::chord_length;

use nalgebra::DMatrix;
use tracing::trace;

use crate::config::CurveConfig;
use crate::error::{FittingError, Result};
use crate::geometry::BSplineCurve;
use crate::math::Point3;

use solve::{discontinuity_matrix, observation_matrix, solve, Solution};

/// Accepted relative deviation of `fp` from the smoothness target.
const SMOOTHING_TOLERANCE: f64 = 0.001;

/// Iteration cap for the smoothing parameter search.
pub const MAX_SMOOTHING_ITERATIONS: usize = 60;

/// Step of the smoothing parameter search before a bracket is found, in `ln p`.
const SEARCH_STEP: f64 = std::f64::consts::LN_10;

/// Result of a spline fit.
#[derive(Debug, Clone)]
pub struct SplineFit {
    /// The fitted curve, defined on `[0, 1]`.
    pub curve: BSplineCurve,
    /// Curve parameter assigned to each input point.
    pub parameters: Vec<f64>,
    /// Summed squared distance between the input points and the curve.
    pub residual: f64,
}

/// Fits a smoothing B-spline through a sequence of 3D points.
pub struct FitSpline {
    points: Vec<Point3>,
    config: CurveConfig,
}

impl FitSpline {
    /// Creates a new `FitSpline` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, config: CurveConfig) -> Self {
        Self { points, config }
    }

    /// Executes the fit.
    ///
    /// # Errors
    ///
    /// Returns a [`FittingError`] if the order is unsupported for the number of
    /// points, the knot estimate is too small, or the smoothing search fails,
    /// and a geometry error if consecutive points coincide.
    pub fn execute(&self) -> Result<SplineFit> {
        self.config.validate()?;
        let k = self.config.order;
        let m = self.points.len();
        if m <= k {
            return Err(FittingError::TooFewPoints {
                order: k,
                points: m,
            }
            .into());
        }

        let n_max = m + k + 1;
        let nest = self.knot_storage(n_max)?;
        let u = chord_length(&self.points)?;
        let s = self.config.smoothness;

        let (knots, solution) = if s <= 0.0 {
            let knots = knots::interpolating(k, &u);
            let solution = solve(&observation_matrix(&knots, k, &u), None, &self.points)?;
            (knots, solution)
        } else {
            self.smoothing_fit(&u, nest, n_max)?
        };

        trace!(
            knots = knots.len(),
            residual = solution.fp,
            "fitted spline of order {k} through {m} points"
        );
        let curve = BSplineCurve::new(knots, k, solution.coefficients)?;
        Ok(SplineFit {
            curve,
            parameters: u,
            residual: solution.fp,
        })
    }

    /// Resolves the knot estimate into a maximum knot count.
    fn knot_storage(&self, n_max: usize) -> Result<usize> {
        let Some(nest) = self.config.knot_estimate else {
            return Ok(n_max);
        };
        let minimum = 2 * self.config.order + 2;
        if nest < minimum {
            return Err(FittingError::KnotStorage {
                available: nest,
                required: minimum,
            }
            .into());
        }
        if self.config.smoothness <= 0.0 && nest < n_max {
            return Err(FittingError::KnotStorage {
                available: nest,
                required: n_max,
            }
            .into());
        }
        Ok(nest)
    }

    fn smoothing_fit(&self, u: &[f64], nest: usize, n_max: usize) -> Result<(Vec<f64>, Solution)> {
        let k = self.config.order;
        let s = self.config.smoothness;

        let mut knots = knots::clamped(k, &[]);
        let mut observation = observation_matrix(&knots, k, u);
        let mut lsq = solve(&observation, None, &self.points)?;
        if lsq.fp <= s {
            return Ok((knots, lsq));
        }

        while lsq.fp > s && knots.len() < n_max {
            let Some(knot) = knots::next_knot(&knots, k, u, &lsq.residuals) else {
                break;
            };
            if knots.len() + 1 > nest {
                return Err(FittingError::KnotStorage {
                    available: nest,
                    required: knots.len() + 1,
                }
                .into());
            }
            knots::insert(&mut knots, knot);
            observation = observation_matrix(&knots, k, u);
            lsq = solve(&observation, None, &self.points)?;
            trace!(knots = knots.len(), fp = lsq.fp, "inserted knot at {knot}");
        }

        if lsq.fp >= s * (1.0 - SMOOTHING_TOLERANCE) {
            return Ok((knots, lsq));
        }
        let smoothed = self.relax(&observation, &knots)?;
        Ok((knots, smoothed))
    }

    /// Searches the smoothing parameter `p` for which `fp(p) ~= s`.
    ///
    /// `fp` falls monotonically from the polynomial residual (`p -> 0`) to the
    /// least-squares residual (`p -> inf`); the search brackets the root in
    /// `ln p` and bisects.
    fn relax(&self, observation: &DMatrix<f64>, knots: &[f64]) -> Result<Solution> {
        let s = self.config.smoothness;
        let mut penalty = discontinuity_matrix(knots, self.config.order);
        let scale = penalty.amax();
        if scale > 0.0 {
            penalty /= scale;
        }

        let (mut below, mut above): (Option<f64>, Option<f64>) = (None, None);
        let mut ln_p = 0.0_f64;
        for iteration in 0..MAX_SMOOTHING_ITERATIONS {
            let solution = solve(observation, Some((&penalty, ln_p.exp())), &self.points)?;
            let excess = solution.fp - s;
            trace!(iteration, p = ln_p.exp(), fp = solution.fp, "smoothing search");
            if excess.abs() <= SMOOTHING_TOLERANCE * s {
                return Ok(solution);
            }
            if excess > 0.0 {
                below = Some(ln_p);
            } else {
                above = Some(ln_p);
            }
            ln_p = match (below, above) {
                (Some(lo), Some(hi)) => 0.5 * (lo + hi),
                (Some(lo), None) => lo + SEARCH_STEP,
                (None, _) => ln_p - SEARCH_STEP,
            };
        }
        Err(FittingError::NotConverged(MAX_SMOOTHING_ITERATIONS).into())
    }
}
