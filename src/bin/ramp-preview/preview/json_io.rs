#![forbid(unsafe_code)]

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Result;
use rampart::HsvColor;
use serde::Serialize;

#[derive(Serialize)]
struct RampDump<'a> {
    name: &'a str,
    colors: &'a [HsvColor],
}

/// Serialize every ramp's display colors to a JSON file.
pub fn save_ramps_json(
    path: impl AsRef<std::path::Path>,
    sections: &[(&str, Vec<HsvColor>)],
) -> Result<PathBuf> {
    let path = path.as_ref();
    let dumps: Vec<RampDump<'_>> = sections
        .iter()
        .map(|(name, colors)| RampDump {
            name,
            colors,
        })
        .collect();
    let f = File::create(path)?;
    let w = BufWriter::new(f);
    serde_json::to_writer_pretty(w, &dumps)?;
    Ok(path.to_path_buf())
}
