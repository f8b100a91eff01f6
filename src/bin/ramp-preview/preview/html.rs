#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Result;
use rampart::HsvColor;

#[inline]
fn hsv_label(color: HsvColor) -> String {
    format!(
        "{}°, {}%, {}%",
        color.hue(),
        color.saturation(),
        color.value()
    )
}

/// Write every ramp as one row of labeled swatch cells.
pub fn write_html_grid(
    title: &str,
    sections: &[(&str, Vec<HsvColor>)],
    path: impl AsRef<std::path::Path>,
) -> Result<std::path::PathBuf> {
    let path = path.as_ref();
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);
    writeln!(
        w,
        r#"<!doctype html><meta charset="utf-8">
<style>
  body{{margin:0;background:#111;color:#eee;font-family:system-ui}}
  h2{{margin:12px}}
  h3{{margin:8px 12px 0}}
  .g{{display:flex;gap:6px;padding:8px}}
  .s{{flex:1;aspect-ratio:3/1;border-radius:10px;display:flex;align-items:center;justify-content:center;
      font-weight:700;text-shadow:0 1px 2px rgba(0,0,0,.35)}}
</style>
<h2>{title}</h2>"#
    )?;
    for (name, colors) in sections {
        writeln!(w, "<h3>{name}</h3>")?;
        writeln!(w, r#"<div class="g">"#)?;
        for &color in colors {
            let hex = color.to_rgb().to_hex();
            writeln!(
                w,
                r#"<div class="s" style="background:{hex}">{} | {hex}</div>"#,
                hsv_label(color)
            )?;
        }
        writeln!(w, "</div>")?;
    }
    Ok(path.to_path_buf())
}
