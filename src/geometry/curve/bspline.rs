use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

use super::{Curve, CurveDomain};

/// A clamped, non-rational B-spline curve in 3D space.
///
/// `C(u) = sum_i N_{i,k}(u) * c_i` over `knots.len() - degree - 1` coefficients.
#[derive(Debug, Clone)]
pub struct BSplineCurve {
    knots: Vec<f64>,
    degree: usize,
    coefficients: Vec<Point3>,
}

impl BSplineCurve {
    /// Creates a B-spline from its knot vector, degree and coefficients.
    ///
    /// # Errors
    ///
    /// Returns an error if the degree is zero, the knot vector is decreasing, or
    /// `knots.len() != coefficients.len() + degree + 1`.
    pub fn new(knots: Vec<f64>, degree: usize, coefficients: Vec<Point3>) -> Result<Self> {
        if degree == 0 {
            return Err(GeometryError::Degenerate("spline degree must be positive".into()).into());
        }
        if coefficients.len() <= degree || knots.len() != coefficients.len() + degree + 1 {
            return Err(GeometryError::Degenerate(format!(
                "{} knots do not fit {} coefficients of degree {degree}",
                knots.len(),
                coefficients.len()
            ))
            .into());
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(GeometryError::Degenerate("knot vector must be non-decreasing".into()).into());
        }
        Ok(Self {
            knots,
            degree,
            coefficients,
        })
    }

    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn coefficients(&self) -> &[Point3] {
        &self.coefficients
    }
}

impl Curve for BSplineCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        let span = find_span(&self.knots, self.degree, t);
        let basis = basis_functions(&self.knots, self.degree, span, t);
        let first = span - self.degree;
        let sum = basis
            .iter()
            .enumerate()
            .fold(Vector3::zeros(), |acc, (r, n)| {
                acc + self.coefficients[first + r].coords * *n
            });
        Ok(Point3::from(sum))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(
            self.knots[self.degree],
            self.knots[self.knots.len() - self.degree - 1],
        )
    }
}

/// Index `s` of the knot span `[knots[s], knots[s + 1])` containing `u`.
///
/// Values at or past the domain end map to the last non-empty span.
pub(crate) fn find_span(knots: &[f64], degree: usize, u: f64) -> usize {
    let n_coef = knots.len() - degree - 1;
    if u >= knots[n_coef] {
        let mut span = n_coef - 1;
        while span > degree && knots[span] >= knots[span + 1] {
            span -= 1;
        }
        return span;
    }
    if u <= knots[degree] {
        let mut span = degree;
        while knots[span + 1] <= u {
            span += 1;
        }
        return span;
    }
    let (mut low, mut high) = (degree, n_coef);
    let mut mid = (low + high) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Values of the `degree + 1` basis functions that are non-zero on `span`,
/// i.e. `N_{span-degree..=span, degree}(u)` (Cox-de Boor triangle).
pub(crate) fn basis_functions(knots: &[f64], degree: usize, span: usize, u: f64) -> Vec<f64> {
    let mut values = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    values[0] = 1.0;
    for j in 1..=degree {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = values[r] / (right[r + 1] + left[j - r]);
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }
    values
}

/// The `degree`-th derivative of `N_{i,degree}` on knot span `span`.
///
/// A degree-`k` basis function is a single polynomial on each span, so its
/// `k`-th derivative there is a constant. Terms with a zero-width denominator
/// vanish.
pub(crate) fn top_derivative_on_span(knots: &[f64], degree: usize, i: usize, span: usize) -> f64 {
    if degree == 0 {
        return if i == span && knots[span] < knots[span + 1] {
            1.0
        } else {
            0.0
        };
    }
    #[allow(clippy::cast_precision_loss)]
    let k = degree as f64;
    let mut value = 0.0;
    let left = knots[i + degree] - knots[i];
    if left > 0.0 {
        value += top_derivative_on_span(knots, degree - 1, i, span) / left;
    }
    let right = knots[i + degree + 1] - knots[i + 1];
    if right > 0.0 {
        value -= top_derivative_on_span(knots, degree - 1, i + 1, span) / right;
    }
    k * value
}
