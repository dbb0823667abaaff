use tracing::debug;

use crate::config::{CurveConfig, REFERENCE_SAMPLES};
use crate::error::{InputError, Result};
use crate::fitting::FitSpline;
use crate::geometry::{ControlPointSet, CoordinateSeries, Curve, SampledPath};
use crate::math::Point3;
use crate::operations::query::{arc_length, estimate_sample_count};

use super::{bezier_curve, CurveMode, PathOptions};

/// Generates sampled paths through three control points.
///
/// The spline configuration is fixed at construction, so one generator can be
/// shared read-only across threads.
#[derive(Debug, Clone)]
pub struct CurveGenerator {
    config: CurveConfig,
    reference_samples: usize,
}

impl CurveGenerator {
    /// Creates a generator with the given spline configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is outside `1..=5` or the smoothness is
    /// negative or not finite.
    pub fn new(config: CurveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            reference_samples: REFERENCE_SAMPLES,
        })
    }

    /// Overrides the density of the reference pass used to estimate sample
    /// counts.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than two samples, which cannot be measured,
    /// or more than [`MAX_SAMPLES`](crate::config::MAX_SAMPLES).
    pub fn with_reference_samples(mut self, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(InputError::TooFewPoints {
                required: 2,
                actual: n,
            }
            .into());
        }
        self.reference_samples = InputError::require_sample_count(n)?;
        Ok(self)
    }

    #[must_use]
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    #[must_use]
    pub fn reference_samples(&self) -> usize {
        self.reference_samples
    }

    /// Samples the Bezier curve of `points` `n` times.
    ///
    /// # Errors
    ///
    /// See [`bezier_curve`].
    pub fn bezier_curve(&self, points: &[Point3], n: usize) -> Result<CoordinateSeries> {
        bezier_curve(points, n)
    }

    /// Fits a spline through `points` with this generator's configuration and
    /// samples it `n` times over its whole parameter range.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero or above
    /// [`MAX_SAMPLES`](crate::config::MAX_SAMPLES), or the fit fails, e.g.
    /// when the order needs more points than given.
    pub fn simple_curve(&self, points: &[Point3], n: usize) -> Result<CoordinateSeries> {
        let n = InputError::require_sample_count(n)?;
        let fit = FitSpline::new(points.to_vec(), self.config).execute()?;
        fit.curve.sample(n)
    }

    /// Generates the waypoints from `current` toward `next`, shaped by `goal`.
    ///
    /// Without an explicit sample count the curve is first sampled at the
    /// reference density, its length turned into a count with
    /// [`estimate_sample_count`], and then sampled again at that count. A count
    /// of zero (a path too short to need a second waypoint) yields the
    /// single start point.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or curve generation fails.
    pub fn get_path(&self, points: &ControlPointSet, options: &PathOptions) -> Result<SampledPath> {
        options.validate()?;

        let n = match options.sample_count {
            Some(n) => n,
            None => self.estimate(points, options)?,
        };
        self.curve(points, options.mode, n)?.into_path()
    }

    /// Runs the reference pass and converts its length into a sample count.
    fn estimate(&self, points: &ControlPointSet, options: &PathOptions) -> Result<usize> {
        let reference = self
            .curve(points, options.mode, self.reference_samples)?
            .into_path()?;
        let n = estimate_sample_count(reference.points(), options.velocity, options.frequency)?;
        debug!(
            length = arc_length(reference.points()),
            velocity = options.velocity,
            frequency = options.frequency,
            samples = n,
            "estimated sample count from {} reference points",
            reference.len()
        );
        if n == 0 {
            debug!("path shorter than one controller step, emitting start point only");
            return Ok(1);
        }
        Ok(n)
    }

    fn curve(&self, points: &ControlPointSet, mode: CurveMode, n: usize) -> Result<CoordinateSeries> {
        let control = points.points();
        match mode {
            CurveMode::Bezier => self.bezier_curve(&control, n),
            CurveMode::Spline => self.simple_curve(&control, n),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::MAX_SAMPLES;
    use crate::error::{FittingError, SplinePathError};
    use approx::assert_relative_eq;

    fn scenario_a() -> ControlPointSet {
        ControlPointSet::from_triples([5.0, 7.0, 13.0], [1.0, 9.0, 0.0], [15.0, 2.0, 11.0]).unwrap()
    }

    /// Start at a robot pose, move 0.2 along x, then 0.1 up.
    fn scenario_b() -> ControlPointSet {
        let center = [0.1, -0.475, 0.425];
        let goal = [center[0] + 0.2, center[1], center[2]];
        let next = [goal[0], goal[1], goal[2] + 0.1];
        ControlPointSet::from_triples(center, goal, next).unwrap()
    }

    fn generator() -> CurveGenerator {
        CurveGenerator::new(CurveConfig::with_order(2)).unwrap()
    }

    #[test]
    fn explicit_count_bezier_path() {
        let path = generator()
            .get_path(&scenario_a(), &PathOptions::default().with_sample_count(30))
            .unwrap();
        assert_eq!(path.len(), 30);
        assert_relative_eq!(*path.first(), Point3::new(5.0, 7.0, 13.0), epsilon = 1e-9);
        assert_relative_eq!(*path.last(), Point3::new(15.0, 2.0, 11.0), epsilon = 1e-9);
    }

    #[test]
    fn estimated_count_matches_formula() {
        let g = generator();
        let options = PathOptions::default();
        let reference = g.bezier_curve(&scenario_b().points(), REFERENCE_SAMPLES).unwrap();
        let reference: Vec<Point3> = reference.points().collect();
        let length = arc_length(&reference);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let expected = ((length / options.velocity / options.frequency) as usize).max(1);

        let path = g.get_path(&scenario_b(), &options).unwrap();
        assert_eq!(path.len(), expected);
        // L ~= 0.248865, 0.248865 / 0.002 / 65 ~= 1.91
        assert_relative_eq!(length, 0.248_865, epsilon = 1e-6);
        assert_eq!(path.len(), 1);
        assert_relative_eq!(*path.first(), *scenario_b().current(), epsilon = 1e-12);
    }

    #[test]
    fn estimated_count_at_slower_velocity() {
        let options = PathOptions::default().with_velocity(0.0002);
        let path = generator().get_path(&scenario_b(), &options).unwrap();
        // 0.248865 / 0.0002 / 65 ~= 19.14
        assert_eq!(path.len(), 19);
        assert_relative_eq!(*path.last(), *scenario_b().next(), epsilon = 1e-12);
    }

    #[test]
    fn coincident_points_give_single_waypoint() {
        let p = [1.0, 2.0, 3.0];
        let set = ControlPointSet::from_triples(p, p, p).unwrap();
        let path = generator().get_path(&set, &PathOptions::default()).unwrap();
        assert_eq!(path.len(), 1);
        assert_relative_eq!(*path.first(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn spline_path_passes_through_goal() {
        let g = generator();
        let options = PathOptions::default()
            .with_mode(CurveMode::Spline)
            .with_sample_count(2001);
        let path = g.get_path(&scenario_a(), &options).unwrap();
        assert_eq!(path.len(), 2001);
        assert_relative_eq!(*path.first(), *scenario_a().current(), epsilon = 1e-9);
        assert_relative_eq!(*path.last(), *scenario_a().next(), epsilon = 1e-9);
        let closest = path
            .points()
            .iter()
            .map(|p| (p - scenario_a().goal()).norm())
            .fold(f64::INFINITY, f64::min);
        assert!(closest < 0.05, "closest approach to goal: {closest}");
    }

    #[test]
    fn spline_estimated_count() {
        let options = PathOptions::default()
            .with_mode(CurveMode::Spline)
            .with_velocity(0.0002);
        let path = generator().get_path(&scenario_b(), &options).unwrap();
        assert!(path.len() > 1);
        assert_relative_eq!(*path.first(), *scenario_b().current(), epsilon = 1e-9);
    }

    #[test]
    fn simple_curve_has_n_samples() {
        let g = generator();
        for n in [1, 2, 5, 100] {
            let series = g.simple_curve(&scenario_a().points(), n).unwrap();
            assert_eq!(series.len(), n);
            assert_eq!(series.y().len(), n);
            assert_eq!(series.z().len(), n);
        }
    }

    #[test]
    fn default_order_cannot_fit_three_points() {
        let g = CurveGenerator::new(CurveConfig::default()).unwrap();
        let options = PathOptions::default()
            .with_mode(CurveMode::Spline)
            .with_sample_count(10);
        assert!(matches!(
            g.get_path(&scenario_a(), &options).unwrap_err(),
            SplinePathError::Fitting(FittingError::TooFewPoints { .. })
        ));
    }

    #[test]
    fn invalid_motion_rejected_before_generation() {
        let options = PathOptions::default().with_velocity(0.0);
        assert!(matches!(
            generator().get_path(&scenario_a(), &options).unwrap_err(),
            SplinePathError::Input(InputError::NonPositive { name: "velocity", .. })
        ));
    }

    #[test]
    fn tiny_velocity_is_an_error_not_a_huge_path() {
        let set = ControlPointSet::from_triples([0.0; 3], [0.5, 0.0, 0.0], [1.0, 0.0, 0.0]).unwrap();
        for mode in [CurveMode::Bezier, CurveMode::Spline] {
            let options = PathOptions::default().with_mode(mode).with_velocity(1e-300);
            assert!(matches!(
                generator().get_path(&set, &options).unwrap_err(),
                SplinePathError::Input(InputError::TooManySamples { max: MAX_SAMPLES, .. })
            ));
        }
        // Finite estimate of about 1.5e6 waypoints is refused as well.
        let options = PathOptions::default().with_velocity(1e-8);
        assert!(generator().get_path(&set, &options).is_err());
    }

    #[test]
    fn oversized_counts_rejected() {
        let g = generator();
        assert!(g.simple_curve(&scenario_a().points(), MAX_SAMPLES + 1).is_err());
        assert!(g.with_reference_samples(MAX_SAMPLES + 1).is_err());
        let options = PathOptions::default().with_sample_count(usize::MAX);
        assert!(matches!(
            generator().get_path(&scenario_a(), &options).unwrap_err(),
            SplinePathError::Input(InputError::TooManySamples { .. })
        ));
    }

    #[test]
    fn explicit_count_skips_estimation() {
        // Tiny path would estimate to one waypoint; the explicit count wins.
        let options = PathOptions::default().with_sample_count(12);
        assert_eq!(generator().get_path(&scenario_b(), &options).unwrap().len(), 12);
    }

    #[test]
    fn reference_density_is_configurable() {
        let g = generator().with_reference_samples(50).unwrap();
        assert_eq!(g.reference_samples(), 50);
        assert!(generator().with_reference_samples(1).is_err());
    }

    #[test]
    fn deterministic() {
        let g = generator();
        let options = PathOptions::default()
            .with_mode(CurveMode::Spline)
            .with_sample_count(64);
        let a = g.get_path(&scenario_a(), &options).unwrap();
        let b = g.get_path(&scenario_a(), &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CurveGenerator>();
    }
}
