//! Independent-mode swatch derivation: every color of a ramp computed from
//! the ramp's curve parameters alone.

use crate::color::HsvColor;

use super::{RampParams, SatCurveMode};

/// Generate the full color list for a ramp in independent mode.
///
/// The ramp is built around a center color at `base_hue`/`base_saturation`
/// and the midpoint of the brightness range. Swatches on either side move
/// away from it by a truncating integer brightness step and by hue/saturation
/// curve terms keyed to their distance from the center. For even counts there
/// is no center swatch; the two middle swatches sit at distance 0.5.
///
/// Pure and total: identical parameters always yield identical output.
#[must_use]
pub fn generate_ramp(params: &RampParams) -> Vec<HsvColor> {
    let n = params.color_count;
    if n == 0 {
        return Vec::new();
    }

    let center = n / 2;
    let is_even = n % 2 == 0;
    // An inverted range collapses to a flat ramp at value_min.
    let span = (params.value_max - params.value_min).max(0);
    let step = if n > 1 { span / (n as i32 - 1) } else { 0 };

    let center_color = HsvColor::new(
        params.base_hue,
        params.base_saturation,
        params.value_min + span / 2,
    );

    let mut colors = vec![HsvColor::default(); n];
    if !is_even {
        colors[center] = center_color;
    }

    let first_bright = if is_even { center } else { center + 1 };
    for (i, color) in colors.iter_mut().enumerate().take(n).skip(first_bright) {
        *color = bright_color(params, center_color, distance(i, center, is_even), step);
    }
    for (i, color) in colors.iter_mut().enumerate().take(center) {
        *color = dark_color(params, center_color, distance(i, center, is_even), step);
    }

    colors
}

/// Distance of swatch `i` from the ramp center, with the half-step offset
/// applied for even counts.
pub(crate) fn distance(i: usize, center: usize, is_even: bool) -> f64 {
    let mut d = (i as f64 - center as f64).abs();
    if is_even {
        if i < center {
            d -= 0.5;
        } else {
            d += 0.5;
        }
    }
    d
}

/// Hue curve term at distance `d`: `hueExp · hueShift · d^hueExp`.
pub(crate) fn hue_term(params: &RampParams, d: f64) -> f64 {
    params.hue_shift_exponent * params.hue_shift * d.powf(params.hue_shift_exponent)
}

/// Saturation curve term at distance `d`: `satShift · satExp · d^satExp`.
pub(crate) fn sat_term(params: &RampParams, d: f64) -> f64 {
    params.sat_shift * params.sat_shift_exponent * d.powf(params.sat_shift_exponent)
}

fn bright_color(params: &RampParams, center: HsvColor, d: f64, step: i32) -> HsvColor {
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

fn dark_color(params: &RampParams, center: HsvColor, d: f64, step: i32) -> HsvColor {
    let saturation = match params.sat_curve_mode {
        SatCurveMode::BrightSideOnly => center.saturation(),
        _ => center.saturation() + sat_term(params, d) as i32,
    };
    HsvColor::new(
        center.hue() - hue_term(params, d) as i32,
        saturation,
        center.value() - (f64::from(step) * d) as i32,
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
    fn five_swatch_zero_shift_progression() {
        let colors = generate_ramp(&flat_params(5));
        let values: Vec<i32> = colors.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![0, 25, 50, 75, 100]);
        assert!(colors.iter().all(|c| c.hue() == 200 && c.saturation() == 50));
    }

    #[test]
    fn even_count_splits_the_center() {
        let colors = generate_ramp(&flat_params(4));
        // step = 100 / 3 = 33, middle pair at distance 0.5 from value 50
        let values: Vec<i32> = colors.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![1, 34, 66, 99]);
    }

    #[test]
    fn single_swatch_is_the_center() {
        let colors = generate_ramp(&flat_params(1));
        assert_eq!(colors, vec![HsvColor::new(200, 50, 50)]);
    }

    #[test]
    fn inverted_range_collapses_to_flat_ramp() {
        let params = RampParams {
            value_min: 100,
            value_max: 0,
            ..flat_params(5)
        };
        let colors = generate_ramp(&params);
        assert!(colors.iter().all(|c| c.value() == 100));
    }

    #[test]
    fn collapsed_range_yields_flat_ramp() {
        let params = RampParams {
            value_min: 60,
            value_max: 60,
            ..flat_params(5)
        };
        let colors = generate_ramp(&params);
        assert!(colors.iter().all(|c| c.value() == 60));
    }

    #[test]
    fn hue_shift_bends_away_from_center() {
        let params = RampParams {
            hue_shift: 10.0,
            hue_shift_exponent: 1.0,
            ..flat_params(5)
        };
        let colors = generate_ramp(&params);
        let hues: Vec<i32> = colors.iter().map(|c| c.hue()).collect();
        assert_eq!(hues, vec![180, 190, 200, 210, 220]);
    }

    #[test]
    fn saturation_modes_pick_sides() {
        let base = RampParams {
            sat_shift: 10.0,
            sat_shift_exponent: 1.0,
            ..flat_params(5)
        };

        let both = generate_ramp(&base);
        let sats: Vec<i32> = both.iter().map(|c| c.saturation()).collect();
        assert_eq!(sats, vec![70, 60, 50, 60, 70]);

        let bright_only = generate_ramp(&RampParams {
            sat_curve_mode: SatCurveMode::BrightSideOnly,
            ..base
        });
        let sats: Vec<i32> = bright_only.iter().map(|c| c.saturation()).collect();
        assert_eq!(sats, vec![50, 50, 50, 60, 70]);

        let dark_only = generate_ramp(&RampParams {
            sat_curve_mode: SatCurveMode::DarkSideOnly,
            ..base
        });
        let sats: Vec<i32> = dark_only.iter().map(|c| c.saturation()).collect();
        assert_eq!(sats, vec![70, 60, 50, 50, 50]);

        let linear = generate_ramp(&RampParams {
            sat_curve_mode: SatCurveMode::Linear,
            ..base
        });
        let sats: Vec<i32> = linear.iter().map(|c| c.saturation()).collect();
        assert_eq!(sats, vec![70, 60, 50, 40, 30]);
    }

    #[test]
    fn generation_is_idempotent() {
        let params = RampParams {
            hue_shift: 7.0,
            hue_shift_exponent: 1.3,
            sat_shift: 4.0,
            sat_shift_exponent: 0.8,
            ..flat_params(6)
        };
        assert_eq!(generate_ramp(&params), generate_ramp(&params));
    }
}
