//! Bernstein basis polynomials used to blend Bezier control points.

/// Binomial coefficient `C(n, k)` as a float.
///
/// Returns `0.0` when `k > n`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut c = 1.0;
    for j in 0..k {
        c = c * (n - j) as f64 / (j + 1) as f64;
    }
    c
}

/// Bernstein weight `C(n, i) * (1 - t)^i * t^(n - i)`.
///
/// `i` counts powers of `(1 - t)`, so `i = n` is the weight that collapses to
/// `1` at `t = 0` and `i = 0` the one that collapses to `1` at `t = 1`.
/// Callers must keep `i <= n` and `t` in `[0, 1]`.
#[must_use]
pub fn bernstein_weight(i: usize, n: usize, t: f64) -> f64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let (a, b) = (i as i32, (n - i) as i32);
    binomial(n, i) * (1.0 - t).powi(a) * t.powi(b)
}
