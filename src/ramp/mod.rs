//! Ramps: ordered swatch sequences derived from curve parameters, plus the
//! per-swatch manual adjustment layer.

use serde::{Deserialize, Serialize};

use crate::color::HsvColor;

pub mod generator;
pub mod negotiator;

pub use negotiator::{DependentRamp, RangeEdge};

/// Controls on which side of the ramp center the saturation curve applies.
///
/// Discriminants match the persisted byte values of host save files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SatCurveMode {
    /// Saturation bends on the bright half only; the dark half stays flat.
    BrightSideOnly = 0,
    /// Saturation bends symmetrically on both halves.
    #[default]
    BothSides = 1,
    /// Saturation falls linearly from the dark end to the bright end.
    Linear = 2,
    /// Saturation bends on the dark half only; the bright half stays flat.
    DarkSideOnly = 3,
}

/// Generation parameters for one ramp.
///
/// Serde-derived so persisted parameter sets round-trip through the same
/// generator and reproduce identical colors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RampParams {
    /// Number of swatches in the ramp (minimum 2 by policy; a count of 1 is
    /// tolerated and yields a single center swatch).
    pub color_count: usize,
    /// Hue of the center color in degrees.
    pub base_hue: i32,
    /// Saturation of the center color in percent.
    pub base_saturation: i32,
    /// Hue shift magnitude per distance unit from the center.
    pub hue_shift: f64,
    /// Exponent applied to the distance in the hue term.
    pub hue_shift_exponent: f64,
    /// Saturation shift magnitude per distance unit from the center.
    pub sat_shift: f64,
    /// Exponent applied to the distance in the saturation term.
    pub sat_shift_exponent: f64,
    /// Lower end of the brightness range.
    pub value_min: i32,
    /// Upper end of the brightness range.
    pub value_max: i32,
    /// Saturation curve policy.
    pub sat_curve_mode: SatCurveMode,
}

impl Default for RampParams {
    fn default() -> Self {
        Self {
            color_count: 5,
            base_hue: 0,
            base_saturation: 50,
            hue_shift: 10.0,
            hue_shift_exponent: 1.0,
            sat_shift: 10.0,
            sat_shift_exponent: 1.0,
            value_min: 0,
            value_max: 100,
            sat_curve_mode: SatCurveMode::BothSides,
        }
    }
}

/// A small signed manual adjustment applied to one swatch after generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTriple {
    /// Hue delta in degrees, added with wrap-around.
    pub hue: i8,
    /// Saturation delta in percent, added then clamped.
    pub sat: i8,
    /// Brightness delta in percent, added then clamped.
    pub val: i8,
}

impl ShiftTriple {
    /// The zero shift.
    pub const ZERO: Self = Self { hue: 0, sat: 0, val: 0 };
}

/// Apply a manual shift to a generated color: hue wraps, saturation and
/// value clamp.
#[must_use]
pub fn apply_shift(color: HsvColor, shift: ShiftTriple) -> HsvColor {
    HsvColor::new(
        color.hue() + i32::from(shift.hue),
        color.saturation() + i32::from(shift.sat),
        color.value() + i32::from(shift.val),
    )
}

/// One position in a ramp: the generated color, the manual shift on top of
/// it, and whether the swatch mirrors a controller from another ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Swatch {
    generated: HsvColor,
    shift: ShiftTriple,
    dependent: bool,
}

impl Swatch {
    /// The color produced by the generator or negotiator, before any shift.
    #[must_use]
    pub fn generated(&self) -> HsvColor {
        self.generated
    }

    /// The manual shift currently applied to this swatch.
    #[must_use]
    pub fn shift(&self) -> ShiftTriple {
        self.shift
    }

    /// Whether this swatch mirrors the source swatch of an inbound link.
    #[must_use]
    pub fn is_dependent(&self) -> bool {
        self.dependent
    }

    /// Generated color with the manual shift applied; what exporters and
    /// visualizers read.
    #[must_use]
    pub fn display_color(&self) -> HsvColor {
        apply_shift(self.generated, self.shift)
    }
}

/// An ordered sequence of swatches plus the parameters they derive from.
#[derive(Clone, Debug)]
pub struct Ramp {
    params: RampParams,
    swatches: Vec<Swatch>,
}

impl Ramp {
    /// Create a ramp and generate its swatches in independent mode.
    #[must_use]
    pub fn new(params: RampParams) -> Self {
        let mut ramp = Self {
            params,
            swatches: vec![Swatch::default(); params.color_count],
        };
        ramp.regenerate();
        ramp
    }

    /// Current generation parameters.
    #[must_use]
    pub fn params(&self) -> &RampParams {
        &self.params
    }

    /// The swatch list, darkest first.
    #[must_use]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Display colors of every swatch, darkest first.
    #[must_use]
    pub fn display_colors(&self) -> Vec<HsvColor> {
        self.swatches.iter().map(Swatch::display_color).collect()
    }

    /// Replace the parameters, rebuilding the swatch list (and discarding
    /// manual shifts) when the count changed, then regenerate.
    pub fn set_params(&mut self, params: RampParams) {
        let rebuild = params.color_count != self.swatches.len();
        self.params = params;
        if rebuild {
            self.swatches = vec![Swatch::default(); params.color_count];
        }
        self.regenerate();
    }

    /// Overwrite the brightness range without regenerating; the caller
    /// decides which generation path runs next.
    pub fn set_value_range(&mut self, value_min: i32, value_max: i32) {
        self.params.value_min = value_min;
        self.params.value_max = value_max;
    }

    /// Re-run independent-mode generation over the whole ramp, keeping the
    /// manual shifts and dependent flags in place.
    pub fn regenerate(&mut self) {
        let colors = generator::generate_ramp(&self.params);
        self.store_generated(&colors);
    }

    /// Re-run dependent-mode generation anchored to `controller`, writing the
    /// negotiated range and virtual-center parameters back for display.
    pub fn regenerate_dependent(
        &mut self,
        anchor_index: usize,
        controller: HsvColor,
        edited_edge: RangeEdge,
    ) {
        let outcome =
            negotiator::generate_dependent_ramp(&self.params, anchor_index, controller, edited_edge);
        self.params.value_min = outcome.value_min;
        self.params.value_max = outcome.value_max;
        self.params.base_hue = outcome.base_hue;
        self.params.base_saturation = outcome.base_saturation;
        self.store_generated(&outcome.colors);
    }

    /// Set the manual shift of one swatch. The caller is responsible for
    /// bounds clamping and for rejecting dependent swatches.
    pub fn set_shift(&mut self, index: usize, shift: ShiftTriple) {
        if let Some(swatch) = self.swatches.get_mut(index) {
            swatch.shift = shift;
        }
    }

    /// Reset every manual shift to zero.
    pub fn clear_shifts(&mut self) {
        for swatch in &mut self.swatches {
            swatch.shift = ShiftTriple::ZERO;
        }
    }

    /// Mark one swatch as dependent (or clear the mark). Marking forces its
    /// shift to zero.
    pub fn set_dependent(&mut self, index: usize, dependent: bool) {
        if let Some(swatch) = self.swatches.get_mut(index) {
            swatch.dependent = dependent;
            if dependent {
                swatch.shift = ShiftTriple::ZERO;
            }
        }
    }

    fn store_generated(&mut self, colors: &[HsvColor]) {
        debug_assert_eq!(colors.len(), self.swatches.len());
        for (swatch, &color) in self.swatches.iter_mut().zip(colors) {
            swatch.generated = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_color_applies_wrap_and_clamp() {
        let c = HsvColor::new(355, 98, 3);
        let shifted = apply_shift(c, ShiftTriple { hue: 10, sat: 5, val: -10 });
        assert_eq!(shifted, HsvColor::new(5, 100, 0));
    }

    #[test]
    fn marking_dependent_zeroes_the_shift() {
        let mut ramp = Ramp::new(RampParams::default());
        ramp.set_shift(1, ShiftTriple { hue: 3, sat: -2, val: 1 });
        ramp.set_dependent(1, true);
        assert_eq!(ramp.swatches()[1].shift(), ShiftTriple::ZERO);
        assert!(ramp.swatches()[1].is_dependent());
    }

    #[test]
    fn count_change_rebuilds_and_discards_shifts() {
        let mut ramp = Ramp::new(RampParams::default());
        ramp.set_shift(0, ShiftTriple { hue: 5, sat: 0, val: 0 });

        let params = RampParams { color_count: 7, ..*ramp.params() };
        ramp.set_params(params);
        assert_eq!(ramp.swatches().len(), 7);
        assert!(ramp.swatches().iter().all(|s| s.shift() == ShiftTriple::ZERO));
    }
}
