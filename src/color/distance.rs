//! CIE94-style ΔE between 8-bit RGB colors, computed over CIE L*a*b*.

use palette::{FromColor, Lab, Srgb};

use super::Rgb888;

/// Perceptual distance between two RGB colors.
///
/// Each color goes through sRGB gamma decode → linear → XYZ (D65) → L*a*b*,
/// then a CIE94-style ΔE is taken with the chroma/hue terms weighted by the
/// mean chroma of the pair, which keeps the metric symmetric. Every
/// sub-radical term is clamped to zero before the square root, since
/// floating-point cancellation can push them slightly negative.
#[must_use]
pub fn delta_e(a: Rgb888, b: Rgb888) -> f64 {
    let lab_a = to_lab(a);
    let lab_b = to_lab(b);

    let dl = lab_a.0 - lab_b.0;
    let da = lab_a.1 - lab_b.1;
    let db = lab_a.2 - lab_b.2;

    let c1 = (lab_a.1 * lab_a.1 + lab_a.2 * lab_a.2).sqrt();
    let c2 = (lab_b.1 * lab_b.1 + lab_b.2 * lab_b.2).sqrt();
    let dc = c1 - c2;
    let dh = (da * da + db * db - dc * dc).max(0.0).sqrt();

    let c_mean = 0.5 * (c1 + c2);
    let sc = 1.0 + 0.045 * c_mean;
    let sh = 1.0 + 0.015 * c_mean;

    let dc_w = dc / sc;
    let dh_w = dh / sh;
    (dl * dl + dc_w * dc_w + dh_w * dh_w).max(0.0).sqrt()
}

fn to_lab(rgb: Rgb888) -> (f64, f64, f64) {
    let srgb = Srgb::new(
        f32::from(rgb.r) / 255.0,
        f32::from(rgb.g) / 255.0,
        f32::from(rgb.b) / 255.0,
    );
    let lab = Lab::from_color(srgb);
    (f64::from(lab.l), f64::from(lab.a), f64::from(lab.b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HsvColor;

    #[test]
    fn identical_colors_have_zero_distance() {
        for c in [
            Rgb888 { r: 0, g: 0, b: 0 },
            Rgb888 { r: 255, g: 255, b: 255 },
            Rgb888 { r: 12, g: 200, b: 97 },
        ] {
            assert_eq!(delta_e(c, c), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (HsvColor::new(10, 80, 90), HsvColor::new(200, 40, 30)),
            (HsvColor::new(0, 0, 0), HsvColor::new(0, 0, 100)),
            (HsvColor::new(120, 100, 100), HsvColor::new(121, 100, 100)),
        ];
        for (a, b) in pairs {
            let ab = delta_e(a.to_rgb(), b.to_rgb());
            let ba = delta_e(b.to_rgb(), a.to_rgb());
            assert!((ab - ba).abs() < 1e-9, "asymmetric: {ab} vs {ba}");
        }
    }

    #[test]
    fn farther_colors_are_more_distant() {
        let base = HsvColor::new(0, 0, 0).to_rgb();
        let near = HsvColor::new(0, 0, 10).to_rgb();
        let far = HsvColor::new(0, 0, 100).to_rgb();
        assert!(delta_e(base, near) < delta_e(base, far));
    }
}
