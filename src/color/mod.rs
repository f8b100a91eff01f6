//! Integer HSV color model and the perceptual distance metric used for
//! spacing optimization and display.

mod distance;
mod hsv;

pub use distance::delta_e;
pub use hsv::{CHANNEL_MAX, CHANNEL_MIN, HUE_DEGREES, HsvColor, Rgb888};
