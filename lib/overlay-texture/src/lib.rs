pub mod color;
pub mod generate;
pub mod solid_overlay;
pub mod vignette_overlay;

pub use color::{ColorEntry, ColorTable, Rgb};
pub use generate::{generate_overlay, generate_solid_overlay, generate_vignette_overlay};

use image::RgbaImage;

pub type OverlayResult<T> = Result<T, OverlayError>;

#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Builds the pixel buffer of one overlay texture
pub trait Overlay {
    fn render(&self, color: Rgb, width: u32, height: u32) -> OverlayResult<RgbaImage>;
}

#[derive(Debug, Clone)]
pub enum OverlayKind {
    /// Fully opaque fill
    Solid,

    /// Transparent center, opacity growing towards the edges
    Vignette(vignette_overlay::VignetteConfig),
}

impl OverlayKind {
    pub fn is_vignette(&self) -> bool {
        matches!(self, OverlayKind::Vignette(_))
    }
}

impl Overlay for OverlayKind {
    fn render(&self, color: Rgb, width: u32, height: u32) -> OverlayResult<RgbaImage> {
        match self {
            OverlayKind::Solid => solid_overlay::render(color, width, height),
            OverlayKind::Vignette(config) => config.render(color, width, height),
        }
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> OverlayResult<()> {
    if width == 0 || height == 0 {
        return Err(OverlayError::InvalidParameter(format!(
            "image size must be positive, got {width}x{height}"
        )));
    }

    Ok(())
}
