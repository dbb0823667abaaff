use crate::math::Point3;

/// Length of the polyline through `points`: the sum of the distances between
/// consecutive points.
///
/// Fewer than two points have zero length. On a densely sampled curve this
/// approaches the curve's arc length from below.
#[must_use]
pub fn arc_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}
