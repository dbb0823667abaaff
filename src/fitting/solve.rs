use nalgebra::DMatrix;

use crate::error::{FittingError, Result};
use crate::geometry::curve::{basis_functions, find_span, top_derivative_on_span};
use crate::math::Point3;

/// Relative singular-value cutoff below which a system counts as rank deficient.
const RANK_TOLERANCE: f64 = 1e-12;

/// Coefficients and residuals of one least-squares solve.
#[derive(Debug, Clone)]
pub struct Solution {
    pub coefficients: Vec<Point3>,
    /// Squared distance of each data point to its fitted position.
    pub residuals: Vec<f64>,
    /// Sum of `residuals`.
    pub fp: f64,
}

/// `m x n_coef` matrix of basis values at the data parameters.
pub fn observation_matrix(knots: &[f64], degree: usize, u: &[f64]) -> DMatrix<f64> {
    let n_coef = knots.len() - degree - 1;
    let mut a = DMatrix::zeros(u.len(), n_coef);
    for (row, &ui) in u.iter().enumerate() {
        let span = find_span(knots, degree, ui);
        for (r, value) in basis_functions(knots, degree, span, ui).into_iter().enumerate() {
            a[(row, span - degree + r)] = value;
        }
    }
    a
}

/// One row per distinct interior knot: the jump of the `degree`-th derivative
/// of every basis function across that knot.
pub fn discontinuity_matrix(knots: &[f64], degree: usize) -> DMatrix<f64> {
    let n_coef = knots.len() - degree - 1;
    let interior: Vec<usize> = (degree + 1..n_coef)
        .filter(|&j| knots[j] > knots[j - 1])
        .collect();

    let mut b = DMatrix::zeros(interior.len(), n_coef);
    for (row, &j) in interior.iter().enumerate() {
        let left_span = (degree..j).rev().find(|&s| knots[s] < knots[s + 1]).unwrap_or(degree);
        for i in j.saturating_sub(degree + 1)..=j.min(n_coef - 1) {
            b[(row, i)] = top_derivative_on_span(knots, degree, i, j)
                - top_derivative_on_span(knots, degree, i, left_span);
        }
    }
    b
}

/// Solves `min sum |A c - y|^2 + sum |B c / p|^2` for the coefficients `c`.
///
/// With `penalty` of `None` this is the plain least-squares spline.
pub fn solve(
    observation: &DMatrix<f64>,
    penalty: Option<(&DMatrix<f64>, f64)>,
    points: &[Point3],
) -> Result<Solution> {
    let n_coef = observation.ncols();
    let m = observation.nrows();
    let extra = penalty.map_or(0, |(b, _)| b.nrows());

    let mut system = DMatrix::zeros(m + extra, n_coef);
    system.rows_mut(0, m).copy_from(observation);
    let mut rhs = DMatrix::zeros(m + extra, 3);
    for (row, p) in points.iter().enumerate() {
        for axis in 0..3 {
            rhs[(row, axis)] = p[axis];
        }
    }
    if let Some((b, p)) = penalty {
        system.rows_mut(m, extra).copy_from(&(b / p));
    }

    let svd = system.svd(true, true);
    let cutoff = svd.singular_values.max() * RANK_TOLERANCE;
    if svd.rank(cutoff) < n_coef {
        return Err(FittingError::Singular("knots violate the Schoenberg-Whitney conditions").into());
    }
    let c = svd.solve(&rhs, cutoff).map_err(FittingError::Singular)?;

    let fitted = observation * &c;
    let residuals: Vec<f64> = points
        .iter()
        .enumerate()
        .map(|(row, p)| (0..3).map(|axis| (fitted[(row, axis)] - p[axis]).powi(2)).sum())
        .collect();
    let fp = residuals.iter().sum();
    let coefficients = (0..n_coef)
        .map(|i| Point3::new(c[(i, 0)], c[(i, 1)], c[(i, 2)]))
        .collect();

    Ok(Solution {
        coefficients,
        residuals,
        fp,
    })
}
