use std::path::Path;

use egui::Color32;
use image::{Rgba, RgbaImage};

use crate::error::ExportError;

/// Largest exported image side, in pixels
pub const MAX_EXPORT_SIDE: u32 = 16384;

/// Read-only copy of the grid for external encoders
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub width: usize,
    pub height: usize,
    /// Cell colors in row-major order
    pub pixels: Vec<Color32>,
}

impl GridSnapshot {
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Render the snapshot with each cell as a `scale`x`scale` block
    pub fn to_image(&self, scale: u32) -> Result<RgbaImage, ExportError> {
        if scale == 0 {
            return Err(ExportError::InvalidScale(scale));
        }
        let side = |cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|cells| cells.checked_mul(scale))
                .filter(|&px| px <= MAX_EXPORT_SIDE)
        };
        let (Some(width), Some(height)) = (side(self.width), side(self.height)) else {
            return Err(ExportError::TooLarge {
                width: self.width,
                height: self.height,
                scale,
            });
        };

        let image = RgbaImage::from_fn(width, height, |px, py| {
            let color = self
                .pixel((px / scale) as usize, (py / scale) as usize)
                .unwrap_or(Color32::TRANSPARENT);
            Rgba(color.to_array())
        });
        Ok(image)
    }

    /// Encode the snapshot as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>, scale: u32) -> Result<(), ExportError> {
        let path = path.as_ref();
        let image = self.to_image(scale)?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        log::info!(
            "Exported {}x{} image to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> GridSnapshot {
        GridSnapshot {
            width: 2,
            height: 2,
            pixels: vec![Color32::BLACK, Color32::WHITE, Color32::WHITE, Color32::BLACK],
        }
    }

    #[test]
    fn test_to_image_scales_cells() {
        let image = checker().to_image(3).unwrap();
        assert_eq!(image.dimensions(), (6, 6));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(3, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(5, 5), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        assert!(matches!(checker().to_image(0), Err(ExportError::InvalidScale(0))));
    }

    #[test]
    fn test_oversized_export_is_rejected() {
        let snapshot = GridSnapshot {
            width: 32,
            height: 32,
            pixels: vec![Color32::WHITE; 32 * 32],
        };
        assert!(matches!(snapshot.to_image(200_000_000), Err(ExportError::TooLarge { scale: 200_000_000, .. })));
        assert!(matches!(snapshot.to_image(MAX_EXPORT_SIDE / 32 + 1), Err(ExportError::TooLarge { .. })));
        assert_eq!(snapshot.to_image(MAX_EXPORT_SIDE / 32 / 8).unwrap().width(), MAX_EXPORT_SIDE / 8);
    }

    #[test]
    fn test_pixel_bounds() {
        assert_eq!(checker().pixel(1, 0), Some(Color32::WHITE));
        assert_eq!(checker().pixel(2, 0), None);
    }
}
