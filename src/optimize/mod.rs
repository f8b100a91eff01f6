//! Spacing optimization: search per-swatch shifts that equalize the
//! perceptual distance between consecutive swatches of a ramp.

use tracing::debug;

use crate::color::{HsvColor, delta_e};
use crate::config::ShiftBounds;
use crate::ramp::ShiftTriple;

mod search;

/// Initial probe step of the shift search, in channel units.
const STEP_START: f64 = 15.0;
/// Final probe step; the search stops once it gets this fine.
const STEP_END: f64 = 0.05;

/// Find per-swatch manual shifts that flatten the spread of perceptual step
/// sizes across `colors`.
///
/// Minimizes `max(d) − min(d)` over the ΔE of consecutive shifted swatches,
/// searching the `3N`-dimensional box given by `bounds` with a deterministic
/// compass search started at the zero shift. The result stays inside the
/// bounds and never spreads worse than the all-zero baseline.
#[must_use]
pub fn optimize_spacing(colors: &[HsvColor], bounds: &ShiftBounds) -> Vec<ShiftTriple> {
    let n = colors.len();
    if n < 2 {
        return vec![ShiftTriple::ZERO; n];
    }

    let (lower, upper) = bounds.boxed(n);
    let start = vec![0.0; 3 * n];
    let best = search::minimize(
        |x| spacing_spread(colors, x),
        &start,
        &lower,
        &upper,
        STEP_START,
        STEP_END,
    );

    debug!(
        swatches = n,
        before = spacing_spread(colors, &start),
        after = spacing_spread(colors, &best),
        "optimized ramp spacing"
    );

    (0..n)
        .map(|i| ShiftTriple {
            hue: best[i * 3] as i8,
            sat: best[i * 3 + 1] as i8,
            val: best[i * 3 + 2] as i8,
        })
        .collect()
}

/// Spread of consecutive perceptual distances under a candidate shift vector
/// (swatch-major hue/sat/val layout, truncated to integers like every other
/// channel computation).
fn spacing_spread(colors: &[HsvColor], x: &[f64]) -> f64 {
    let shifted: Vec<_> = colors
        .iter()
        .enumerate()
        .map(|(i, c)| {
            HsvColor::new(
                c.hue() + x[i * 3] as i32,
                c.saturation() + x[i * 3 + 1] as i32,
                c.value() + x[i * 3 + 2] as i32,
            )
            .to_rgb()
        })
        .collect();

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for pair in shifted.windows(2) {
        let d = delta_e(pair[0], pair[1]);
        min = min.min(d);
        max = max.max(d);
    }
    (max - min).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uneven_ramp() -> Vec<HsvColor> {
        // Deliberately bunched toward the dark end.
        vec![
            HsvColor::new(200, 50, 0),
            HsvColor::new(200, 50, 10),
            HsvColor::new(200, 50, 25),
            HsvColor::new(200, 50, 70),
            HsvColor::new(200, 50, 100),
        ]
    }

    #[test]
    fn shifts_stay_inside_bounds() {
        let bounds = ShiftBounds::default();
        let shifts = optimize_spacing(&uneven_ramp(), &bounds);
        assert_eq!(shifts.len(), 5);
        for s in shifts {
            assert!(f64::from(s.hue) >= bounds.hue_min && f64::from(s.hue) <= bounds.hue_max);
            assert!(f64::from(s.sat) >= bounds.sat_min && f64::from(s.sat) <= bounds.sat_max);
            assert!(f64::from(s.val) >= bounds.val_min && f64::from(s.val) <= bounds.val_max);
        }
    }

    #[test]
    fn never_worsens_the_baseline_spread() {
        let colors = uneven_ramp();
        let shifts = optimize_spacing(&colors, &ShiftBounds::default());

        let as_vector: Vec<f64> = shifts
            .iter()
            .flat_map(|s| [f64::from(s.hue), f64::from(s.sat), f64::from(s.val)])
            .collect();
        let baseline = spacing_spread(&colors, &vec![0.0; 15]);
        let optimized = spacing_spread(&colors, &as_vector);
        assert!(optimized <= baseline);
    }

    #[test]
    fn degenerate_ramps_get_zero_shifts() {
        assert!(optimize_spacing(&[], &ShiftBounds::default()).is_empty());
        let single = optimize_spacing(&[HsvColor::new(0, 0, 50)], &ShiftBounds::default());
        assert_eq!(single, vec![ShiftTriple::ZERO]);
    }
}
