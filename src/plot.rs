//! Chart output: writes the rendered chart to disk and optionally opens it.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::error::BenchError;
use crate::report::ensure_parent_dir;
use crate::timer::Measurement;

/// Saves the chart to `path`, overwriting it. `.svg` paths get the vector document,
/// everything else a PNG raster.
pub fn save_chart(measurements: &[Measurement], path: &Path) -> Result<(), BenchError> {
    let bytes = encode_chart(measurements, path)?;
    write_chart(&bytes, path)
}

/// Renders the chart in the format `path` asks for, without touching the filesystem.
pub fn encode_chart(measurements: &[Measurement], path: &Path) -> Result<Vec<u8>, BenchError> {
    let document = crate::svg::render_chart(measurements);
    if is_svg(path) {
        Ok(document.into_bytes())
    } else {
        rasterize(&document)
    }
}

pub fn write_chart(bytes: &[u8], path: &Path) -> Result<(), BenchError> {
    ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|e| BenchError::io(path, e))?;
    info!(path = %path.display(), bytes = bytes.len(), "chart saved");
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

#[cfg(feature = "resvg")]
fn rasterize(document: &str) -> Result<Vec<u8>, BenchError> {
    use resvg::{tiny_skia, usvg};

    let mut opt = usvg::Options::default();
    std::sync::Arc::make_mut(&mut opt.fontdb).load_system_fonts();
    let tree = usvg::Tree::from_str(document, &opt)
        .map_err(|e| BenchError::Render(format!("invalid SVG: {e}")))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| BenchError::Render(format!("cannot allocate {size:?} pixmap")))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| BenchError::Render(format!("PNG encoding failed: {e}")))
}

#[cfg(not(feature = "resvg"))]
fn rasterize(_document: &str) -> Result<Vec<u8>, BenchError> {
    Err(BenchError::Render(
        "PNG output needs the `resvg` feature; use an .svg image path".to_string(),
    ))
}

/// Opens `path` in the platform image viewer without waiting for it to close.
/// A viewer that cannot be launched is logged and otherwise ignored.
pub fn show(path: &Path) {
    let mut cmd = viewer_command(path);
    match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => info!(path = %path.display(), "opened chart viewer"),
        Err(e) => warn!(path = %path.display(), "failed to open chart viewer: {e}"),
    }
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg("start").arg("").arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}
