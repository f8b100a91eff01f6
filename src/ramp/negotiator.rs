//! Dependent-mode derivation: a ramp anchored to another ramp's swatch, with
//! the brightness range negotiated to keep the anchor feasible.

use serde::{Deserialize, Serialize};

use crate::color::{CHANNEL_MAX, CHANNEL_MIN, HsvColor};

use super::generator::{distance, hue_term, sat_term};
use super::{RampParams, SatCurveMode};

/// Which edge of the brightness range the caller is actively editing.
///
/// The negotiator keeps that edge where the user put it (after clamping into
/// the feasible interval) and recomputes the opposite edge from the anchor
/// constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeEdge {
    /// The lower range value drives; the upper value is derived.
    #[default]
    Lower,
    /// The upper range value drives; the lower value is derived.
    Upper,
}

/// Result of a dependent-mode recompute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependentRamp {
    /// Generated color per swatch, darkest first. The anchor slot holds the
    /// controller color exactly.
    pub colors: Vec<HsvColor>,
    /// Negotiated lower brightness range value.
    pub value_min: i32,
    /// Negotiated upper brightness range value.
    pub value_max: i32,
    /// Virtual-center hue, written back for display while dependent.
    pub base_hue: i32,
    /// Virtual-center saturation, written back for display while dependent.
    pub base_saturation: i32,
}

/// Generate a ramp that passes exactly through `controller` at
/// `anchor_index`.
///
/// The brightness range is first forced into the feasible interval where the
/// arithmetic brightness progression can still hit the controller's
/// brightness at the anchor, then the remaining swatches are generated from a
/// virtual center derived backward from the anchor. All divisions truncate
/// toward zero, matching the generator's integer step semantics.
#[must_use]
pub fn generate_dependent_ramp(
    params: &RampParams,
    anchor_index: usize,
    controller: HsvColor,
    edited_edge: RangeEdge,
) -> DependentRamp {
    let n = params.color_count.max(1);
    let k = anchor_index.min(n - 1);
    let nf = n as f64;
    let kf = k as f64;
    let cb = controller.value();
    let cbf = f64::from(cb);

    let (min_min, max_max) = feasible_range(n, k, cb);

    let mut lower = params.value_min.clamp(min_min, max_max);
    let mut higher = params.value_max.clamp(min_min, max_max);
    match edited_edge {
        RangeEdge::Lower => {
            if lower < min_min || k == 0 {
                lower = min_min;
            }
            if k > 0 {
                higher = ((f64::from(lower) * (kf - nf + 1.0) + (nf - 1.0) * cbf) / kf) as i32;
            }
        }
        RangeEdge::Upper => {
            if higher > max_max || k == n - 1 {
                higher = max_max;
            }
            if k + 1 != n {
                lower = ((f64::from(higher) * kf - nf * cbf + cbf) / (kf - nf + 1.0)) as i32;
            }
        }
    }

    let center = n / 2;
    let is_even = n % 2 == 0;
    // A reversed range after negotiation collapses to a flat progression.
    let step = if n > 1 {
        (higher - lower).max(0) / (n as i32 - 1)
    } else {
        0
    };

    let mut colors = vec![HsvColor::default(); n];
    colors[k] = controller;

    let virtual_center = virtual_center(params, controller, k, center, is_even, step);
    if !is_even && center != k {
        colors[center] = virtual_center;
    }

    for i in 0..n {
        if i == k || (i == center && !is_even) {
            continue;
        }
        let d = distance(i, center, is_even);
        colors[i] = if i < center {
            dark_of(params, virtual_center, d, step)
        } else {
            bright_of(params, virtual_center, d, step)
        };
    }

    DependentRamp {
        colors,
        value_min: lower,
        value_max: higher,
        base_hue: virtual_center.hue(),
        base_saturation: virtual_center.saturation(),
    }
}

/// Feasible `(min_min, max_max)` for the range under the anchor constraint.
///
/// Each bound comes from a bounded scan of integer candidates for the
/// opposite edge: the brightness progression pinned at the anchor is a linear
/// relation between the two edges, and only candidates whose partner value
/// stays inside the global `[0, 100]` brightness bounds survive. An anchor at
/// the first (resp. last) index removes the corresponding constraint.
fn feasible_range(n: usize, k: usize, cb: i32) -> (i32, i32) {
    let nf = n as f64;
    let kf = k as f64;
    let cbf = f64::from(cb);
    let minf = f64::from(CHANNEL_MIN);
    let maxf = f64::from(CHANNEL_MAX);

    let mut max_max = CHANNEL_MIN;
    if k > 0 {
        for i in CHANNEL_MIN..=cb {
            let temp_max = (f64::from(i) * (kf - nf + 1.0) + (nf - 1.0) * cbf) / kf;
            if temp_max <= maxf && temp_max >= minf && temp_max > f64::from(max_max) {
                max_max = temp_max as i32;
            }
        }
    } else {
        max_max = CHANNEL_MAX;
    }

    let mut min_min = CHANNEL_MAX;
    if k + 1 != n {
        for i in cb..=CHANNEL_MAX {
            let temp_min = (f64::from(i) * kf - nf * cbf + cbf) / (kf - nf + 1.0);
            if temp_min <= maxf && temp_min >= minf && temp_min < f64::from(min_min) {
                min_min = temp_min as i32;
            }
        }
    } else {
        min_min = CHANNEL_MIN;
    }

    (min_min, max_max)
}

/// Color at the ramp's geometric center, derived backward from the anchor.
///
/// Direction of every term flips depending on whether the center lies on the
/// dark or bright side of the anchor. For an even count where the anchor is
/// the center index itself, the raw half-step distance would go negative; it
/// is clamped to zero before exponentiation.
fn virtual_center(
    params: &RampParams,
    controller: HsvColor,
    k: usize,
    center: usize,
    is_even: bool,
    step: i32,
) -> HsvColor {
    let mut d = (center as f64 - k as f64).abs();
    if center < k {
        if is_even {
            d += 0.5;
        }
        let saturation = match params.sat_curve_mode {
            SatCurveMode::DarkSideOnly => controller.saturation(),
            SatCurveMode::Linear => controller.saturation() + sat_term(params, d) as i32,
            _ => controller.saturation() - sat_term(params, d) as i32,
        };
        HsvColor::new(
            controller.hue() - hue_term(params, d) as i32,
            saturation,
            controller.value() - (d * f64::from(step)) as i32,
        )
    } else {
        if is_even {
            d = (d - 0.5).max(0.0);
        }
        let saturation = match params.sat_curve_mode {
            SatCurveMode::BrightSideOnly => controller.saturation(),
            _ => controller.saturation() - sat_term(params, d) as i32,
        };
        HsvColor::new(
            controller.hue() + hue_term(params, d) as i32,
            saturation,
            controller.value() + (d * f64::from(step)) as i32,
        )
    }
}

fn dark_of(params: &RampParams, center: HsvColor, d: f64, step: i32) -> HsvColor {
    let saturation = match params.sat_curve_mode {
        SatCurveMode::BrightSideOnly => center.saturation(),
        _ => center.saturation() + sat_term(params, d) as i32,
    };
    HsvColor::new(
        center.hue() - hue_term(params, d) as i32,
        saturation,
        (f64::from(center.value()) - f64::from(step) * d) as i32,
    )
}

fn bright_of(params: &RampParams, center: HsvColor, d: f64, step: i32) -> HsvColor {
    let saturation = match params.sat_curve_mode {
        SatCurveMode::DarkSideOnly => center.saturation(),
        SatCurveMode::Linear => center.saturation() - sat_term(params, d) as i32,
        _ => center.saturation() + sat_term(params, d) as i32,
    };
    HsvColor::new(
        center.hue() + hue_term(params, d) as i32,
        saturation,
        (f64::from(center.value()) + f64::from(step) * d) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_params(n: usize) -> RampParams {
        RampParams {
            color_count: n,
            base_hue: 200,
            base_saturation: 50,
            hue_shift: 0.0,
            hue_shift_exponent: 0.0,
            sat_shift: 0.0,
            sat_shift_exponent: 0.0,
            value_min: 0,
            value_max: 100,
            sat_curve_mode: SatCurveMode::BothSides,
        }
    }

    #[test]
    fn anchor_holds_controller_color_exactly() {
        let controller = HsvColor::new(33, 77, 60);
        let out = generate_dependent_ramp(&flat_params(5), 2, controller, RangeEdge::Lower);
        assert_eq!(out.colors[2], controller);
    }

    #[test]
    fn center_anchor_range_is_feasible() {
        let controller = HsvColor::new(0, 0, 60);
        let out = generate_dependent_ramp(&flat_params(5), 2, controller, RangeEdge::Lower);

        // min_min = 20, max_max = 100 for N=5, k=2, Cb=60
        assert!(out.value_min >= 20);
        assert!(out.value_min <= 60);
        assert!(out.value_max >= 60);
        assert!(out.value_max <= 100);
        assert_eq!(out.colors[2].value(), 60);
    }

    #[test]
    fn lower_edge_drives_upper_edge() {
        let controller = HsvColor::new(0, 0, 60);
        let out = generate_dependent_ramp(&flat_params(5), 2, controller, RangeEdge::Lower);
        // lower clamps to min_min = 20, upper derives to 100, step = 20
        assert_eq!(out.value_min, 20);
        assert_eq!(out.value_max, 100);
        let values: Vec<i32> = out.colors.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![20, 40, 60, 80, 100]);
    }

    #[test]
    fn upper_edge_drives_lower_edge() {
        let controller = HsvColor::new(0, 0, 60);
        let params = RampParams {
            value_max: 80,
            ..flat_params(5)
        };
        let out = generate_dependent_ramp(&params, 2, controller, RangeEdge::Upper);
        // lower = (80*2 - 5*60 + 60) / (2 - 5 + 1) = (160 - 240) / -2 = 40
        assert_eq!(out.value_max, 80);
        assert_eq!(out.value_min, 40);
        let values: Vec<i32> = out.colors.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![40, 50, 60, 70, 80]);
    }

    #[test]
    fn anchor_at_first_index_pins_the_lower_edge() {
        let controller = HsvColor::new(0, 0, 30);
        let out = generate_dependent_ramp(&flat_params(5), 0, controller, RangeEdge::Lower);
        // k == 0: lower forced to the controller brightness side's feasible
        // minimum and the anchor sits at the bottom of the progression.
        assert_eq!(out.colors[0].value(), 30);
        assert_eq!(out.value_min, 30);
    }

    #[test]
    fn anchor_at_last_index_pins_the_upper_edge() {
        let controller = HsvColor::new(0, 0, 70);
        let out = generate_dependent_ramp(&flat_params(5), 4, controller, RangeEdge::Upper);
        assert_eq!(out.colors[4].value(), 70);
        assert_eq!(out.value_max, 70);
    }

    #[test]
    fn virtual_center_feeds_base_parameters() {
        let controller = HsvColor::new(100, 60, 60);
        let params = RampParams {
            hue_shift: 10.0,
            hue_shift_exponent: 1.0,
            sat_shift: 10.0,
            sat_shift_exponent: 1.0,
            ..flat_params(5)
        };
        // Anchor at index 4 (bright end): center lies below, distance 2.
        let out = generate_dependent_ramp(&params, 4, controller, RangeEdge::Lower);
        assert_eq!(out.base_hue, 100 - 20);
        assert_eq!(out.base_saturation, 60 - 20);
        assert_eq!(out.colors[2].hue(), 80);
    }

    #[test]
    fn even_count_center_anchor_collapses_to_controller() {
        // N=4 puts the center index on the anchor itself; the raw half-step
        // distance would be negative and must clamp to zero, so the virtual
        // center is the controller and no curve term leaks in.
        let controller = HsvColor::new(120, 60, 50);
        let params = RampParams {
            hue_shift: 10.0,
            hue_shift_exponent: 2.0,
            sat_shift: 10.0,
            sat_shift_exponent: 2.0,
            ..flat_params(4)
        };
        let out = generate_dependent_ramp(&params, 2, controller, RangeEdge::Lower);
        assert_eq!(out.colors[2], controller);
        assert_eq!(out.base_hue, controller.hue());
        assert_eq!(out.base_saturation, controller.saturation());
    }

    #[test]
    fn recompute_is_idempotent() {
        let controller = HsvColor::new(210, 40, 55);
        let params = RampParams {
            hue_shift: 6.0,
            hue_shift_exponent: 1.2,
            ..flat_params(6)
        };
        let a = generate_dependent_ramp(&params, 1, controller, RangeEdge::Lower);
        let b = generate_dependent_ramp(&params, 1, controller, RangeEdge::Lower);
        assert_eq!(a, b);
    }
}
