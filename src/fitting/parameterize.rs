use crate::error::{GeometryError, InputError, Result};
use crate::math::{Point3, TOLERANCE};

/// Cumulative chord-length parameters of `points`, normalized to `[0, 1]`.
///
/// # Errors
///
/// Returns an error for fewer than two points or when two consecutive points
/// coincide.
pub fn chord_length(points: &[Point3]) -> Result<Vec<f64>> {
    if points.len() < 2 {
        return Err(InputError::TooFewPoints {
            required: 2,
            actual: points.len(),
        }
        .into());
    }

    let mut params = Vec::with_capacity(points.len());
    params.push(0.0);
    let mut total = 0.0;
    for (i, pair) in points.windows(2).enumerate() {
        let d = (pair[1] - pair[0]).norm();
        if d < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "fit points {i} and {} coincide",
                i + 1
            ))
            .into());
        }
        total += d;
        params.push(total);
    }

    for u in &mut params {
        *u /= total;
    }
    if let Some(last) = params.last_mut() {
        *last = 1.0;
    }
    Ok(params)
}
