use crate::{
    Overlay, OverlayKind, OverlayResult, Rgb, color::validate_name,
    vignette_overlay::VignetteConfig,
};
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Render one overlay and write it as `<output_dir>/<name>.png`.
///
/// The output directory must already exist. Returns the written path.
pub fn generate_overlay(
    overlay: &OverlayKind,
    name: &str,
    color: Rgb,
    width: u32,
    height: u32,
    output_dir: impl AsRef<Path>,
) -> OverlayResult<PathBuf> {
    validate_name(name)?;

    let image = overlay.render(color, width, height)?;
    let path = output_dir.as_ref().join(format!("{name}.png"));
    image.save_with_format(&path, ImageFormat::Png)?;

    log::debug!("wrote {} ({width}x{height}, {overlay:?})", path.display());
    Ok(path)
}

pub fn generate_solid_overlay(
    name: &str,
    color: Rgb,
    width: u32,
    height: u32,
    output_dir: impl AsRef<Path>,
) -> OverlayResult<PathBuf> {
    generate_overlay(&OverlayKind::Solid, name, color, width, height, output_dir)
}

pub fn generate_vignette_overlay(
    name: &str,
    color: Rgb,
    width: u32,
    height: u32,
    output_dir: impl AsRef<Path>,
) -> OverlayResult<PathBuf> {
    let overlay = OverlayKind::Vignette(VignetteConfig::default());
    generate_overlay(&overlay, name, color, width, height, output_dir)
}
