//! Knot vectors for clamped splines on `[0, 1]`.

/// A clamped knot vector: `degree + 1` zeros, `interior`, `degree + 1` ones.
pub fn clamped(degree: usize, interior: &[f64]) -> Vec<f64> {
    let mut knots = Vec::with_capacity(2 * degree + 2 + interior.len());
    knots.extend(std::iter::repeat_n(0.0, degree + 1));
    knots.extend_from_slice(interior);
    knots.extend(std::iter::repeat_n(1.0, degree + 1));
    knots
}

/// Knots for a spline that interpolates data at parameters `u`.
///
/// Yields `u.len() - degree - 1` interior knots: the data parameters themselves
/// for odd degrees, midpoints between neighbours for even degrees.
pub fn interpolating(degree: usize, u: &[f64]) -> Vec<f64> {
    let half = degree / 2;
    let count = u.len().saturating_sub(degree + 1);
    let interior: Vec<f64> = (0..count)
        .map(|l| {
            if degree % 2 == 1 {
                u[half + 1 + l]
            } else {
                0.5 * (u[half + 1 + l] + u[half + l])
            }
        })
        .collect();
    clamped(degree, &interior)
}

/// Picks a new interior knot for a smoothing fit, or `None` when no knot
/// interval holds a data parameter strictly inside it.
///
/// Residuals are summed per knot interval; the new knot goes to the middle data
/// parameter of the worst interval.
pub fn next_knot(knots: &[f64], degree: usize, u: &[f64], residuals: &[f64]) -> Option<f64> {
    let n_coef = knots.len() - degree - 1;
    let mut best: Option<(f64, f64)> = None;

    for span in degree..n_coef {
        let (lo, hi) = (knots[span], knots[span + 1]);
        if lo >= hi {
            continue;
        }
        let last_span = span + 1 == n_coef;
        let mut total = 0.0;
        let mut inside = Vec::new();
        for (&ui, &ri) in u.iter().zip(residuals) {
            if ui >= lo && (ui < hi || (last_span && ui <= hi)) {
                total += ri;
                if ui > lo && ui < hi {
                    inside.push(ui);
                }
            }
        }
        if inside.is_empty() {
            continue;
        }
        let candidate = inside[inside.len() / 2];
        if best.is_none_or(|(worst, _)| total > worst) {
            best = Some((total, candidate));
        }
    }

    best.map(|(_, knot)| knot)
}

/// Inserts `knot` keeping the vector sorted.
pub fn insert(knots: &mut Vec<f64>, knot: f64) {
    let at = knots.partition_point(|&k| k <= knot);
    knots.insert(at, knot);
}
