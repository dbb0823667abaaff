use crate::config::MAX_SAMPLES;
use crate::error::{InputError, Result};
use crate::math::Point3;

use super::arc_length;

/// Estimates how many waypoints to emit for a path.
///
/// With `L` the polyline length of `path`, the count is
/// `trunc((L / velocity) / frequency)`. `path` should be densely sampled
/// (several hundred points); a coarse polyline underestimates `L` and with it
/// the count.
///
/// The result may be `0` for a very short path.
///
/// # Errors
///
/// Returns an error if `path` has fewer than two points, `velocity` or
/// `frequency` is not a positive finite number, or the count would exceed
/// [`MAX_SAMPLES`].
pub fn estimate_sample_count(path: &[Point3], velocity: f64, frequency: f64) -> Result<usize> {
    if path.len() < 2 {
        return Err(InputError::TooFewPoints {
            required: 2,
            actual: path.len(),
        }
        .into());
    }
    let velocity = InputError::require_positive("velocity", velocity)?;
    let frequency = InputError::require_positive("frequency", frequency)?;

    let length = arc_length(path);
    let n = (length / velocity) / frequency;
    if !n.is_finite() {
        return Err(InputError::NonFinite("estimated sample count").into());
    }
    #[allow(clippy::cast_precision_loss)]
    let limit = MAX_SAMPLES as f64;
    if n > limit {
        return Err(InputError::TooManySamples {
            requested: n,
            max: MAX_SAMPLES,
        }
        .into());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = n as usize;
    Ok(n)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SplinePathError;

    fn segment(len: f64) -> Vec<Point3> {
        vec![Point3::origin(), Point3::new(len, 0.0, 0.0)]
    }

    #[test]
    fn divides_travel_time_by_frequency() {
        // 1.3 / 0.01 = 130 time units, / 2 = 65
        assert_eq!(estimate_sample_count(&segment(1.3), 0.01, 2.0).unwrap(), 65);
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(estimate_sample_count(&segment(1.0), 0.3, 1.0).unwrap(), 3);
        assert_eq!(estimate_sample_count(&segment(0.001), 0.002, 65.0).unwrap(), 0);
    }

    #[test]
    fn scales_linearly_with_path() {
        let base: Vec<Point3> = (0..500)
            .map(|i| {
                let t = f64::from(i) / 499.0;
                Point3::new(t, t * t, 0.5 * t)
            })
            .collect();
        let n1 = estimate_sample_count(&base, 0.001, 10.0).unwrap();
        for k in [2.0, 3.5, 10.0] {
            let scaled: Vec<Point3> = base.iter().map(|p| Point3::from(p.coords * k)).collect();
            let nk = estimate_sample_count(&scaled, 0.001, 10.0).unwrap();
            #[allow(clippy::cast_precision_loss)]
            let expected = n1 as f64 * k;
            // Truncation costs at most one sample before and after scaling.
            #[allow(clippy::cast_precision_loss)]
            let diff = (nk as f64 - expected).abs();
            assert!(diff <= k + 1.0, "k = {k}: {nk} vs {expected}");
        }
    }

    #[test]
    fn rejects_short_path() {
        let err = estimate_sample_count(&[Point3::origin()], 1.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            SplinePathError::Input(InputError::TooFewPoints { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn rejects_non_positive_motion() {
        let path = segment(1.0);
        assert!(matches!(
            estimate_sample_count(&path, 0.0, 1.0).unwrap_err(),
            SplinePathError::Input(InputError::NonPositive { name: "velocity", .. })
        ));
        assert!(matches!(
            estimate_sample_count(&path, 1.0, -5.0).unwrap_err(),
            SplinePathError::Input(InputError::NonPositive { name: "frequency", .. })
        ));
        assert!(estimate_sample_count(&path, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn tiny_velocity_exceeds_limit() {
        let err = estimate_sample_count(&segment(1.0), 1e-300, 65.0).unwrap_err();
        assert!(matches!(
            err,
            SplinePathError::Input(InputError::TooManySamples { max: MAX_SAMPLES, .. })
        ));
        // 1 / 1e-9 / 65 ~= 1.5e7, finite but far too many
        assert!(estimate_sample_count(&segment(1.0), 1e-9, 65.0).is_err());
    }

    #[test]
    fn limit_itself_is_accepted() {
        #[allow(clippy::cast_precision_loss)]
        let len = MAX_SAMPLES as f64;
        assert_eq!(estimate_sample_count(&segment(len), 1.0, 1.0).unwrap(), MAX_SAMPLES);
    }
}
