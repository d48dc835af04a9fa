use crate::{OverlayResult, Rgb, check_dimensions};
use image::RgbaImage;

/// Fill a `width`x`height` buffer with `color` at full opacity
pub fn render(color: Rgb, width: u32, height: u32) -> OverlayResult<RgbaImage> {
    check_dimensions(width, height)?;

    Ok(RgbaImage::from_pixel(width, height, color.with_alpha(255)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_every_pixel_is_opaque_color() {
        let image = render(Rgb::new(0, 255, 0), 4, 2).unwrap();

        assert_eq!(image.dimensions(), (4, 2));
        assert!(image.pixels().all(|p| *p == Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(render(Rgb::new(1, 2, 3), 0, 10).is_err());
        assert!(render(Rgb::new(1, 2, 3), 10, 0).is_err());
    }
}
