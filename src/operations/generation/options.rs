use crate::config::MotionProfile;
use crate::error::{InputError, Result};

/// Which curve family a path is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveMode {
    /// Blend of all control points; passes through the first and last only.
    #[default]
    Bezier,
    /// Smoothing spline fitted through the control points.
    Spline,
}

/// Per-call path parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOptions {
    /// Controller update rate, in updates per second.
    pub frequency: f64,
    /// Travel speed, in distance units per second.
    pub velocity: f64,
    /// Explicit waypoint count. `None` estimates it from the path length.
    pub sample_count: Option<usize>,
    pub mode: CurveMode,
}

impl Default for PathOptions {
    fn default() -> Self {
        MotionProfile::default().into()
    }
}

impl From<MotionProfile> for PathOptions {
    fn from(motion: MotionProfile) -> Self {
        Self {
            frequency: motion.frequency,
            velocity: motion.velocity,
            sample_count: None,
            mode: CurveMode::default(),
        }
    }
}

impl PathOptions {
    /// Sets an explicit waypoint count.
    #[must_use]
    pub fn with_sample_count(mut self, n: usize) -> Self {
        self.sample_count = Some(n);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: CurveMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Checks the options before any computation runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the frequency or velocity is not a positive finite
    /// number, or the explicit sample count is zero or above
    /// [`MAX_SAMPLES`](crate::config::MAX_SAMPLES).
    pub fn validate(&self) -> Result<()> {
        InputError::require_positive("frequency", self.frequency)?;
        InputError::require_positive("velocity", self.velocity)?;
        if let Some(n) = self.sample_count {
            InputError::require_sample_count(n)?;
        }
        Ok(())
    }
}
