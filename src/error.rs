use thiserror::Error;

use crate::config::MAX_SAMPLES;

/// Top-level error type for path generation.
#[derive(Debug, Error)]
pub enum SplinePathError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Fitting(#[from] FittingError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while validating caller input, before any computation runs.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("at least {required} points are required, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("sample count must be at least 1")]
    ZeroSamples,

    #[error("sample count {requested} exceeds the limit of {max}")]
    TooManySamples { requested: f64, max: usize },

    #[error("coordinate axes differ in length: x = {x}, y = {y}, z = {z}")]
    MismatchedAxes { x: usize, y: usize, z: usize },
}

impl InputError {
    /// Checks that `value` is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonFinite`] or [`InputError::NonPositive`].
    pub fn require_positive(name: &'static str, value: f64) -> std::result::Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite(name));
        }
        if value <= 0.0 {
            return Err(Self::NonPositive { name, value });
        }
        Ok(value)
    }

    /// Checks that a sample count lies in `1..=MAX_SAMPLES`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ZeroSamples`] or [`InputError::TooManySamples`].
    pub fn require_sample_count(n: usize) -> std::result::Result<usize, Self> {
        if n == 0 {
            return Err(Self::ZeroSamples);
        }
        if n > MAX_SAMPLES {
            #[allow(clippy::cast_precision_loss)]
            let requested = n as f64;
            return Err(Self::TooManySamples {
                requested,
                max: MAX_SAMPLES,
            });
        }
        Ok(n)
    }
}

/// Errors raised by the smoothing spline fit.
#[derive(Debug, Error, PartialEq)]
pub enum FittingError {
    #[error("spline order {0} is outside 1..=5")]
    InvalidOrder(usize),

    #[error("a spline of order {order} needs more than {order} points, got {points}")]
    TooFewPoints { order: usize, points: usize },

    #[error("smoothness must be finite and non-negative, got {0}")]
    InvalidSmoothing(f64),

    #[error("knot storage of {available} is too small, {required} knots needed")]
    KnotStorage { available: usize, required: usize },

    #[error("least-squares system is singular: {0}")]
    Singular(&'static str),

    #[error("smoothing parameter did not converge after {0} iterations")]
    NotConverged(usize),
}

/// Errors related to geometric computations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`SplinePathError`].
pub type Result<T> = std::result::Result<T, SplinePathError>;
