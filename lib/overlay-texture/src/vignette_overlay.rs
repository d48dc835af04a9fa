use crate::{Overlay, OverlayError, OverlayResult, Rgb, check_dimensions};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgba, RgbaImage};

/// Vignette configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct VignetteConfig {
    /// Opacity reached at full distance, in [0, 1]
    #[derivative(Default(value = "0.8"))]
    max_opacity: f64,

    #[setters(skip)]
    center: Option<(u32, u32)>,
}

impl VignetteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the falloff origin away from the image center. The reference
    /// distance stays the one from the origin to pixel (0, 0), so pixels
    /// farther than that saturate at `max_opacity`.
    pub fn with_center(mut self, x: u32, y: u32) -> Self {
        self.center = Some((x, y));
        self
    }

    pub fn max_opacity(&self) -> f64 {
        self.max_opacity
    }

    fn falloff(&self, width: u32, height: u32) -> OverlayResult<Falloff> {
        if !(0.0..=1.0).contains(&self.max_opacity) {
            return Err(OverlayError::InvalidParameter(format!(
                "max opacity must be within [0, 1], got {}",
                self.max_opacity
            )));
        }

        let (center_x, center_y) = self.center.unwrap_or((width / 2, height / 2));
        let (center_x, center_y) = (center_x as f64, center_y as f64);

        Ok(Falloff {
            center_x,
            center_y,
            max_distance: (center_x * center_x + center_y * center_y).sqrt(),
            max_opacity: self.max_opacity,
        })
    }
}

struct Falloff {
    center_x: f64,
    center_y: f64,
    max_distance: f64,
    max_opacity: f64,
}

impl Falloff {
    fn alpha(&self, x: u32, y: u32) -> u8 {
        let dx = x as f64 - self.center_x;
        let dy = y as f64 - self.center_y;
        let distance = (dx * dx + dy * dy).sqrt();

        // origin on (0, 0): only the origin itself stays transparent
        let intensity = if self.max_distance > 0.0 {
            (distance / self.max_distance).min(1.0)
        } else if distance > 0.0 {
            1.0
        } else {
            0.0
        };

        (255.0 * intensity * self.max_opacity).floor() as u8
    }
}

impl Overlay for VignetteConfig {
    fn render(&self, color: Rgb, width: u32, height: u32) -> OverlayResult<RgbaImage> {
        check_dimensions(width, height)?;
        let falloff = self.falloff(width, height)?;

        let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = color.with_alpha(falloff.alpha(x, y));
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb::new(0, 255, 0);

    fn alpha(image: &RgbaImage, x: u32, y: u32) -> u8 {
        image.get_pixel(x, y)[3]
    }

    #[test]
    fn test_center_transparent_corner_capped() {
        let image = VignetteConfig::new().render(GREEN, 64, 36).unwrap();

        assert_eq!(alpha(&image, 32, 18), 0);
        assert_eq!(alpha(&image, 0, 0), 204);
        assert!(image.pixels().all(|p| p[0] == 0 && p[1] == 255 && p[2] == 0));
        assert!(image.pixels().all(|p| p[3] <= 204));
    }

    #[test]
    fn test_default_size_corner() {
        let falloff = VignetteConfig::new().falloff(1920, 1080).unwrap();

        assert_eq!(falloff.alpha(960, 540), 0);
        assert_eq!(falloff.alpha(0, 0), 204);
    }

    #[test]
    fn test_alpha_non_decreasing_along_radius() {
        let image = VignetteConfig::new().render(GREEN, 64, 36).unwrap();
        let (cx, cy) = (32u32, 18u32);

        // towards the left edge
        let row: Vec<u8> = (0..=cx).rev().map(|x| alpha(&image, x, cy)).collect();
        assert!(row.windows(2).all(|w| w[0] <= w[1]));

        // towards the bottom edge
        let column: Vec<u8> = (cy..36).map(|y| alpha(&image, cx, y)).collect();
        assert!(column.windows(2).all(|w| w[0] <= w[1]));

        // diagonal towards (0, 0)
        let diagonal: Vec<u8> = (0..=cy).map(|i| alpha(&image, cx - i, cy - i)).collect();
        assert!(diagonal.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_thin_images_do_not_divide_by_zero() {
        let column = VignetteConfig::new().render(GREEN, 1, 2).unwrap();
        assert_eq!(alpha(&column, 0, 1), 0);
        assert_eq!(alpha(&column, 0, 0), 204);

        let row = VignetteConfig::new().render(GREEN, 2, 1).unwrap();
        assert_eq!(alpha(&row, 1, 0), 0);
        assert_eq!(alpha(&row, 0, 0), 204);

        let single = VignetteConfig::new().render(GREEN, 1, 1).unwrap();
        assert_eq!(*single.get_pixel(0, 0), Rgba([0, 255, 0, 0]));
    }

    #[test]
    fn test_off_center_origin_saturates() {
        let image = VignetteConfig::new()
            .with_center(1, 1)
            .render(GREEN, 4, 4)
            .unwrap();

        assert_eq!(alpha(&image, 1, 1), 0);
        assert_eq!(alpha(&image, 0, 0), 204);
        // farther than the reference distance
        assert_eq!(alpha(&image, 3, 3), 204);
    }

    #[test]
    fn test_origin_at_top_left_corner() {
        let image = VignetteConfig::new()
            .with_center(0, 0)
            .render(GREEN, 4, 4)
            .unwrap();

        assert_eq!(alpha(&image, 0, 0), 0);
        assert_eq!(alpha(&image, 1, 0), 204);
        assert_eq!(alpha(&image, 3, 3), 204);
    }

    #[test]
    fn test_full_opacity() {
        let image = VignetteConfig::new()
            .with_max_opacity(1.0)
            .render(GREEN, 8, 8)
            .unwrap();

        assert_eq!(alpha(&image, 0, 0), 255);
        assert_eq!(alpha(&image, 4, 4), 0);
    }

    #[test]
    fn test_invalid_opacity_rejected() {
        assert!(VignetteConfig::new().with_max_opacity(1.5).render(GREEN, 4, 4).is_err());
        assert!(VignetteConfig::new().with_max_opacity(-0.1).render(GREEN, 4, 4).is_err());
        assert!(VignetteConfig::new().with_max_opacity(f64::NAN).render(GREEN, 4, 4).is_err());
    }
}
