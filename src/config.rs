//! Engine configuration: manual-shift bounds and the default brightness
//! span, loadable from a JSON file with built-in fallbacks.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::ramp::ShiftTriple;

/// Default location on disk where the engine looks for its JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/engine.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "RAMPART_CONFIG_PATH";

/// Built-in per-channel shift bound magnitude.
const DEFAULT_SHIFT_SPAN: f64 = 10.0;

/// Per-channel bounds for manual shifts, shared by the adjustment layer and
/// the spacing optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftBounds {
    /// Smallest allowed hue shift.
    pub hue_min: f64,
    /// Largest allowed hue shift.
    pub hue_max: f64,
    /// Smallest allowed saturation shift.
    pub sat_min: f64,
    /// Largest allowed saturation shift.
    pub sat_max: f64,
    /// Smallest allowed brightness shift.
    pub val_min: f64,
    /// Largest allowed brightness shift.
    pub val_max: f64,
}

impl ShiftBounds {
    /// Clamp every component of a shift triple into these bounds.
    #[must_use]
    pub fn clamp(&self, shift: ShiftTriple) -> ShiftTriple {
        ShiftTriple {
            hue: clamp_component(shift.hue, self.hue_min, self.hue_max),
            sat: clamp_component(shift.sat, self.sat_min, self.sat_max),
            val: clamp_component(shift.val, self.val_min, self.val_max),
        }
    }

    /// The bounds as a flat `(lower, upper)` box over the `3N`-dimensional
    /// shift space of an `n`-swatch ramp, swatch-major.
    #[must_use]
    pub fn boxed(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        let mut lower = Vec::with_capacity(3 * n);
        let mut upper = Vec::with_capacity(3 * n);
        for _ in 0..n {
            lower.extend_from_slice(&[self.hue_min, self.sat_min, self.val_min]);
            upper.extend_from_slice(&[self.hue_max, self.sat_max, self.val_max]);
        }
        (lower, upper)
    }
}

fn clamp_component(value: i8, min: f64, max: f64) -> i8 {
    f64::from(value).clamp(min, max) as i8
}

impl Default for ShiftBounds {
    fn default() -> Self {
        Self {
            hue_min: -DEFAULT_SHIFT_SPAN,
            hue_max: DEFAULT_SHIFT_SPAN,
            sat_min: -DEFAULT_SHIFT_SPAN,
            sat_max: DEFAULT_SHIFT_SPAN,
            val_min: -DEFAULT_SHIFT_SPAN,
            val_max: DEFAULT_SHIFT_SPAN,
        }
    }
}

/// Immutable engine configuration shared by a palette graph.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Bounds for per-swatch manual shifts.
    pub shift_bounds: ShiftBounds,
    /// Lower brightness range value restored when a link is created or
    /// removed.
    pub default_value_min: i32,
    /// Upper brightness range value restored when a link is created or
    /// removed.
    pub default_value_max: i32,
}

impl EngineConfig {
    /// Load the engine configuration from disk, falling back to the built-in
    /// defaults when the file is missing or malformed.
    #[must_use]
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded engine config");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse engine config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "engine config not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read engine config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shift_bounds: ShiftBounds::default(),
            default_value_min: 0,
            default_value_max: 100,
        }
    }
}

/// JSON representation of the configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    shift_bounds: Option<RawShiftBounds>,
    #[serde(default)]
    default_value_min: Option<i32>,
    #[serde(default)]
    default_value_max: Option<i32>,
}

/// JSON representation of the shift bounds block.
#[derive(Debug, Deserialize)]
struct RawShiftBounds {
    hue_min: f64,
    hue_max: f64,
    sat_min: f64,
    sat_max: f64,
    val_min: f64,
    val_max: f64,
}

impl From<RawConfig> for EngineConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            shift_bounds: raw.shift_bounds.map_or(defaults.shift_bounds, Into::into),
            default_value_min: raw.default_value_min.unwrap_or(defaults.default_value_min),
            default_value_max: raw.default_value_max.unwrap_or(defaults.default_value_max),
        }
    }
}

impl From<RawShiftBounds> for ShiftBounds {
    fn from(raw: RawShiftBounds) -> Self {
        Self {
            hue_min: raw.hue_min,
            hue_max: raw.hue_max,
            sat_min: raw.sat_min,
            sat_max: raw.sat_max,
            val_min: raw.val_min,
            val_max: raw.val_max,
        }
    }
}

/// Resolve the configuration path taking the environment override into
/// account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_clamp_respects_bounds() {
        let bounds = ShiftBounds::default();
        let clamped = bounds.clamp(ShiftTriple { hue: 120, sat: -120, val: 3 });
        assert_eq!(clamped, ShiftTriple { hue: 10, sat: -10, val: 3 });
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let raw: RawConfig = serde_json::from_str(r#"{"default_value_max": 90}"#).unwrap();
        let config: EngineConfig = raw.into();
        assert_eq!(config.default_value_max, 90);
        assert_eq!(config.default_value_min, 0);
        assert_eq!(config.shift_bounds, ShiftBounds::default());
    }

    #[test]
    fn full_config_parses() {
        let json = r#"{
            "shift_bounds": {
                "hue_min": -15.0, "hue_max": 15.0,
                "sat_min": -5.0, "sat_max": 5.0,
                "val_min": -8.0, "val_max": 8.0
            },
            "default_value_min": 10,
            "default_value_max": 95
        }"#;
        let raw: RawConfig = serde_json::from_str(json).unwrap();
        let config: EngineConfig = raw.into();
        assert_eq!(config.shift_bounds.hue_max, 15.0);
        assert_eq!(config.shift_bounds.sat_min, -5.0);
        assert_eq!(config.default_value_min, 10);
    }

    #[test]
    fn bounds_box_is_swatch_major() {
        let bounds = ShiftBounds::default();
        let (lower, upper) = bounds.boxed(2);
        assert_eq!(lower.len(), 6);
        assert_eq!(lower, vec![-10.0; 6]);
        assert_eq!(upper, vec![10.0; 6]);
    }
}
