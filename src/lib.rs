//! Palette ramp generation and cross-ramp link propagation for pixel-art
//! palettes.
//!
//! A *ramp* is an ordered run of colors from shadow to highlight, derived
//! procedurally from a handful of curve parameters ([`ramp::generator`]).
//! Ramps can be chained: a *link* forces one swatch of a ramp to mirror a
//! swatch of another ramp, and the anchored ramp re-derives its parameters
//! and a feasible brightness range backward from that color
//! ([`ramp::negotiator`]). The [`graph::PaletteGraph`] owns the ramps and
//! links and cascades every recompute to transitive dependents. An on-demand
//! optimizer ([`optimize`]) equalizes the perceptual spacing of a ramp by
//! searching per-swatch manual shifts.

pub mod color;
pub mod config;
mod error;
pub mod graph;
pub mod optimize;
pub mod ramp;

pub use color::{HsvColor, Rgb888, delta_e};
pub use config::{EngineConfig, ShiftBounds};
pub use error::GraphError;
pub use graph::{Link, PaletteGraph, RampId, SwatchRef};
pub use ramp::{RampParams, RangeEdge, SatCurveMode, ShiftTriple};
