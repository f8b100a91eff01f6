//! Demo palette graph: a base ramp, a linked ramp, and an optimized ramp,
//! written out as HTML and JSON for eyeballing.

#![forbid(unsafe_code)]

mod html;
mod json_io;

use std::{env, fs, path::PathBuf};

use anyhow::Result;
use rampart::{
    EngineConfig, PaletteGraph, RampParams, SatCurveMode, SwatchRef,
};

use html::write_html_grid;
use json_io::save_ramps_json;

pub fn run() -> Result<()> {
    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("target"));
    let out_dir = target_dir.join("ramp-preview");
    fs::create_dir_all(&out_dir)?;

    let mut graph = PaletteGraph::new(EngineConfig::load());

    // Warm skin-tone base ramp.
    let base = graph.add_ramp(RampParams {
        color_count: 7,
        base_hue: 20,
        base_saturation: 55,
        hue_shift: 8.0,
        hue_shift_exponent: 1.0,
        sat_shift: 6.0,
        sat_shift_exponent: 1.0,
        value_min: 10,
        value_max: 95,
        sat_curve_mode: SatCurveMode::BothSides,
    });

    // Cool shadow ramp anchored to the base ramp's darkest swatch.
    let shadow = graph.add_ramp(RampParams {
        color_count: 5,
        base_hue: 250,
        base_saturation: 40,
        hue_shift: 10.0,
        hue_shift_exponent: 1.0,
        sat_shift: 5.0,
        sat_shift_exponent: 1.0,
        ..RampParams::default()
    });
    graph.create_link(
        SwatchRef { ramp: base, swatch: 1 },
        SwatchRef { ramp: shadow, swatch: 3 },
        false,
    )?;

    // A green foliage ramp with optimized perceptual spacing.
    let foliage = graph.add_ramp(RampParams {
        color_count: 6,
        base_hue: 110,
        base_saturation: 60,
        hue_shift: 12.0,
        hue_shift_exponent: 1.4,
        sat_shift: 8.0,
        sat_shift_exponent: 1.0,
        value_min: 5,
        value_max: 90,
        sat_curve_mode: SatCurveMode::BrightSideOnly,
    });
    graph.apply_spacing_optimization(foliage)?;

    let named = [
        ("base", base),
        ("shadow (linked to base)", shadow),
        ("foliage (optimized)", foliage),
    ];
    let mut sections = Vec::new();
    for (title, id) in named {
        sections.push((title, graph.display_colors(id)?));
    }

    let html_path = write_html_grid("rampart preview", &sections, out_dir.join("ramps.html"))?;
    let json_path = save_ramps_json(out_dir.join("ramps.json"), &sections)?;

    println!(
        "Generated ramp previews in {}:\n  - {}\n  - {}",
        out_dir.display(),
        html_path.display(),
        json_path.display()
    );

    Ok(())
}
