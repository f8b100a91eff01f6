//! A small bound-constrained derivative-free minimizer (compass search).

/// Minimize `f` over the box `[lower, upper]` starting from `start`.
///
/// Classic compass search: probe each coordinate by ±`step`, keep the first
/// strict improvement, halve the step once a full sweep yields none, stop
/// when the step falls below `step_end`. Only strictly improving moves are
/// accepted, so the result never evaluates worse than the starting point.
/// Every probe is clamped into the box, so the result always satisfies the
/// bounds.
pub fn minimize<F>(
    mut f: F,
    start: &[f64],
    lower: &[f64],
    upper: &[f64],
    step_start: f64,
    step_end: f64,
) -> Vec<f64>
where
    F: FnMut(&[f64]) -> f64,
{
    debug_assert_eq!(start.len(), lower.len());
    debug_assert_eq!(start.len(), upper.len());

    let mut x: Vec<f64> = start
        .iter()
        .zip(lower.iter().zip(upper))
        .map(|(&v, (&lo, &hi))| v.clamp(lo, hi))
        .collect();
    let mut best = f(&x);

    let mut step = step_start;
    while step >= step_end {
        let mut improved = false;
        for i in 0..x.len() {
            let original = x[i];
            for candidate in [original + step, original - step] {
                let candidate = candidate.clamp(lower[i], upper[i]);
                if candidate == original {
                    continue;
                }
                x[i] = candidate;
                let value = f(&x);
                if value < best {
                    best = value;
                    improved = true;
                    break;
                }
                x[i] = original;
            }
        }
        if !improved {
            step *= 0.5;
        }
    }

    x
}
