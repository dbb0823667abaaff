use serde::{Deserialize, Serialize};

use crate::error::{FittingError, Result};

/// Samples taken per axis when a Bezier curve is requested without a count.
pub const DEFAULT_BEZIER_SAMPLES: usize = 1000;

/// Density of the reference pass used to measure a curve before estimating
/// the final sample count.
pub const REFERENCE_SAMPLES: usize = 500;

/// Highest spline order the fit accepts.
pub const MAX_ORDER: usize = 5;

/// Most waypoints a single path may hold, whether requested explicitly or
/// estimated from the motion profile.
pub const MAX_SAMPLES: usize = 100_000;

/// Spline fitting parameters, fixed for the lifetime of a generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Upper bound on the summed squared residual of the fit. `0` interpolates;
    /// larger values trade closeness for smoothness.
    pub smoothness: f64,
    /// Spline degree, `1..=5`. Odd values behave best at small smoothness.
    pub order: usize,
    /// Upper bound on the number of knots. `None` sizes it automatically.
    pub knot_estimate: Option<usize>,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            smoothness: 3.0,
            order: 3,
            knot_estimate: None,
        }
    }
}

impl CurveConfig {
    /// Default configuration with the given spline order.
    #[must_use]
    pub fn with_order(order: usize) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Sets the smoothness.
    #[must_use]
    pub fn smoothness(mut self, smoothness: f64) -> Self {
        self.smoothness = smoothness;
        self
    }

    /// Sets the knot estimate.
    #[must_use]
    pub fn knot_estimate(mut self, knot_estimate: Option<usize>) -> Self {
        self.knot_estimate = knot_estimate;
        self
    }

    /// Checks the parts of the configuration that do not depend on the data.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is outside `1..=5` or the smoothness is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_ORDER).contains(&self.order) {
            return Err(FittingError::InvalidOrder(self.order).into());
        }
        if !self.smoothness.is_finite() || self.smoothness < 0.0 {
            return Err(FittingError::InvalidSmoothing(self.smoothness).into());
        }
        Ok(())
    }
}

/// How fast the controller consumes waypoints and how fast the end-effector
/// should travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionProfile {
    /// Controller update rate, in updates per second.
    pub frequency: f64,
    /// Travel speed, in distance units per second.
    pub velocity: f64,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            frequency: 65.0,
            velocity: 0.002,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SplinePathError;

    #[test]
    fn defaults() {
        let c = CurveConfig::default();
        assert_eq!(c.order, 3);
        assert!((c.smoothness - 3.0).abs() < f64::EPSILON);
        assert_eq!(c.knot_estimate, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn order_out_of_range() {
        for order in [0, 6] {
            let err = CurveConfig::with_order(order).validate().unwrap_err();
            assert!(matches!(
                err,
                SplinePathError::Fitting(FittingError::InvalidOrder(o)) if o == order
            ));
        }
    }

    #[test]
    fn negative_smoothness() {
        assert!(CurveConfig::default().smoothness(-1.0).validate().is_err());
        assert!(CurveConfig::default().smoothness(f64::NAN).validate().is_err());
    }

    #[test]
    fn yaml_fills_missing_fields() {
        let c: CurveConfig = serde_yaml::from_str("order: 2\n").unwrap();
        assert_eq!(c, CurveConfig::with_order(2));

        let m: MotionProfile = serde_yaml::from_str("velocity: 0.05\n").unwrap();
        assert!((m.frequency - 65.0).abs() < f64::EPSILON);
        assert!((m.velocity - 0.05).abs() < f64::EPSILON);
    }
}
