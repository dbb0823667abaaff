use crate::error::{InputError, Result};
use crate::math::Point3;

/// A single `(x, y, z)` control point.
pub type ControlPoint = Point3;

/// The three control points defining one path segment.
///
/// The path starts at `current`, bends toward `goal` and ends near `next`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPointSet {
    current: ControlPoint,
    goal: ControlPoint,
    next: ControlPoint,
}

impl ControlPointSet {
    /// Creates a control point set.
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is NaN or infinite.
    pub fn new(current: ControlPoint, goal: ControlPoint, next: ControlPoint) -> Result<Self> {
        for p in [&current, &goal, &next] {
            if !p.iter().all(|c| c.is_finite()) {
                return Err(InputError::NonFinite("control point coordinate").into());
            }
        }
        Ok(Self {
            current,
            goal,
            next,
        })
    }

    /// Creates a control point set from raw `[x, y, z]` triples.
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is NaN or infinite.
    pub fn from_triples(current: [f64; 3], goal: [f64; 3], next: [f64; 3]) -> Result<Self> {
        Self::new(current.into(), goal.into(), next.into())
    }

    #[must_use]
    pub fn current(&self) -> &ControlPoint {
        &self.current
    }

    #[must_use]
    pub fn goal(&self) -> &ControlPoint {
        &self.goal
    }

    #[must_use]
    pub fn next(&self) -> &ControlPoint {
        &self.next
    }

    /// Returns the points in path order: current, goal, next.
    #[must_use]
    pub fn points(&self) -> [ControlPoint; 3] {
        [self.current, self.goal, self.next]
    }
}

/// Per-axis coordinate sequences of a sampled curve.
///
/// All three vectors always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateSeries {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl CoordinateSeries {
    /// Builds a series from separate axis vectors.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MismatchedAxes`] unless all three have the same
    /// length.
    pub fn from_axes(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(InputError::MismatchedAxes {
                x: x.len(),
                y: y.len(),
                z: z.len(),
            }
            .into());
        }
        Ok(Self { x, y, z })
    }

    /// Creates an empty series with room for `n` samples per axis.
    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
        }
    }

    /// Appends one sample.
    pub fn push(&mut self, p: &Point3) {
        self.x.push(p.x);
        self.y.push(p.y);
        self.z.push(p.z);
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[must_use]
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Splits the series back into its `(x, y, z)` vectors.
    #[must_use]
    pub fn into_axes(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.x, self.y, self.z)
    }

    /// Iterates over the samples as points.
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| Point3::new(x, y, z))
    }

    /// Zips the three axes into a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the series is empty.
    pub fn into_path(self) -> Result<SampledPath> {
        SampledPath::new(self.points().collect())
    }
}

impl FromIterator<Point3> for CoordinateSeries {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut series = Self::with_capacity(iter.size_hint().0);
        for p in iter {
            series.push(&p);
        }
        series
    }
}

/// An ordered, non-empty sequence of waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledPath {
    points: Vec<Point3>,
}

impl SampledPath {
    /// Wraps a list of waypoints.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.is_empty() {
            return Err(InputError::TooFewPoints {
                required: 1,
                actual: 0,
            }
            .into());
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a path holds at least one waypoint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First waypoint.
    #[must_use]
    pub fn first(&self) -> &Point3 {
        &self.points[0]
    }

    /// Last waypoint.
    #[must_use]
    pub fn last(&self) -> &Point3 {
        &self.points[self.points.len() - 1]
    }

    /// Waypoints as `(x, y, z)` tuples.
    #[must_use]
    pub fn to_tuples(&self) -> Vec<(f64, f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y, p.z)).collect()
    }

    /// Waypoints as `[x, y, z]` arrays.
    #[must_use]
    pub fn to_triples(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(|p| [p.x, p.y, p.z]).collect()
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }
}

impl<'a> IntoIterator for &'a SampledPath {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
