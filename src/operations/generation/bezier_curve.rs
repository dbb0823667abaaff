use crate::config::DEFAULT_BEZIER_SAMPLES;
use crate::error::{InputError, Result};
use crate::geometry::{BezierCurve, CoordinateSeries, Curve};
use crate::math::Point3;

/// Samples the Bezier curve defined by `points` at `n` evenly spaced
/// parameters in `[0, 1]`.
///
/// The curve degree is `points.len() - 1`. For `n >= 2` the first sample is the
/// first control point and the last sample the last control point.
///
/// # Errors
///
/// Returns an error if `n` is zero or above
/// [`MAX_SAMPLES`](crate::config::MAX_SAMPLES), fewer than two points are
/// given, or a coordinate is not finite.
pub fn bezier_curve(points: &[Point3], n: usize) -> Result<CoordinateSeries> {
    let n = InputError::require_sample_count(n)?;
    BezierCurve::new(points.to_vec())?.sample(n)
}

/// Samples the Bezier curve of `points` [`DEFAULT_BEZIER_SAMPLES`] times.
///
/// # Errors
///
/// See [`bezier_curve`].
pub fn bezier_curve_default(points: &[Point3]) -> Result<CoordinateSeries> {
    bezier_curve(points, DEFAULT_BEZIER_SAMPLES)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::MAX_SAMPLES;
    use crate::error::SplinePathError;
    use approx::assert_relative_eq;

    fn points() -> [Point3; 3] {
        [
            Point3::new(5.0, 7.0, 13.0),
            Point3::new(1.0, 9.0, 0.0),
            Point3::new(15.0, 2.0, 11.0),
        ]
    }

    #[test]
    fn endpoints_equal_outer_control_points() {
        let series = bezier_curve(&points(), 30).unwrap();
        let samples: Vec<Point3> = series.points().collect();
        assert_relative_eq!(samples[0], points()[0], epsilon = 1e-12);
        assert_relative_eq!(samples[29], points()[2], epsilon = 1e-12);
    }

    #[test]
    fn every_axis_has_n_samples() {
        for n in [1, 2, 3, 30, 1000] {
            let series = bezier_curve(&points(), n).unwrap();
            assert_eq!(series.x().len(), n);
            assert_eq!(series.y().len(), n);
            assert_eq!(series.z().len(), n);
        }
    }

    #[test]
    fn default_count_samples_thousand_points() {
        let series = bezier_curve_default(&points()).unwrap();
        assert_eq!(series.len(), 1000);
        assert_eq!(series, bezier_curve(&points(), DEFAULT_BEZIER_SAMPLES).unwrap());
        let samples: Vec<Point3> = series.points().collect();
        assert_relative_eq!(samples[999], points()[2], epsilon = 1e-12);
    }

    #[test]
    fn single_sample_is_start() {
        let series = bezier_curve(&points(), 1).unwrap();
        assert_relative_eq!(series.points().next().unwrap(), points()[0]);
    }

    #[test]
    fn does_not_pass_through_goal() {
        let series = bezier_curve(&points(), 200).unwrap();
        let goal = points()[1];
        let closest = series
            .points()
            .map(|p| (p - goal).norm())
            .fold(f64::INFINITY, f64::min);
        assert!(closest > 1.0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = bezier_curve(&points(), 77).unwrap();
        let b = bezier_curve(&points(), 77).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_samples_rejected() {
        assert!(matches!(
            bezier_curve(&points(), 0).unwrap_err(),
            SplinePathError::Input(InputError::ZeroSamples)
        ));
    }

    #[test]
    fn oversized_count_rejected() {
        assert!(matches!(
            bezier_curve(&points(), MAX_SAMPLES + 1).unwrap_err(),
            SplinePathError::Input(InputError::TooManySamples { .. })
        ));
        assert!(bezier_curve(&points(), usize::MAX).is_err());
    }

    #[test]
    fn more_control_points() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 1.0),
            Point3::new(3.0, 0.0, 1.0),
        ];
        let samples: Vec<Point3> = bezier_curve(&pts, 5).unwrap().points().collect();
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[4], pts[3], epsilon = 1e-12);
    }
}
