mod bezier_curve;
mod generator;
mod options;

pub use bezier_curve::{bezier_curve, bezier_curve_default};
pub use generator::CurveGenerator;
pub use options::{CurveMode, PathOptions};
