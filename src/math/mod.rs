pub mod bernstein;

pub use bernstein::{bernstein_weight, binomial};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `n` evenly spaced values over `[start, end]`, endpoints included.
///
/// A single sample yields `[start]`; zero samples yield an empty vector.
#[must_use]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let step = (end - start) / (n - 1) as f64;
            #[allow(clippy::cast_precision_loss)]
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last value so the grid hits `end` exactly.
            values[n - 1] = end;
            values
        }
    }
}
