pub mod curve;
pub mod path;

pub use curve::{BSplineCurve, BezierCurve, Curve, CurveDomain};
pub use path::{ControlPoint, ControlPointSet, CoordinateSeries, SampledPath};
