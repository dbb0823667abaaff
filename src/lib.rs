//! Smooth 3D end-effector paths between three control points.
//!
//! A [`CurveGenerator`] turns `(current, goal, next)` into a list of waypoints,
//! either along a Bezier curve or a fitted smoothing spline. When no waypoint
//! count is given, the path is measured at a reference density and resampled
//! to the count a motion controller needs for the requested speed.

pub mod config;
pub mod error;
pub mod fitting;
pub mod geometry;
pub mod math;
pub mod operations;

pub use config::{CurveConfig, MotionProfile};
pub use error::{Result, SplinePathError};
pub use geometry::{ControlPoint, ControlPointSet, CoordinateSeries, SampledPath};
pub use operations::generation::{
    bezier_curve, bezier_curve_default, CurveGenerator, CurveMode, PathOptions,
};
pub use operations::query::{arc_length, estimate_sample_count};
