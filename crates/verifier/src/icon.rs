//! Icon inspection.

use crate::config::IconPolicy;
use aixverify_common::{Error, Result};
use image::{DynamicImage, GenericImageView};
use tracing::debug;

/// Result of inspecting a decoded icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconInspection {
    pub width: u32,
    pub height: u32,
    /// Edge length the icon was checked against.
    pub expected_size: u32,
    pub dimensions_ok: bool,
    pub opaque_ok: bool,
}

impl IconInspection {
    pub fn is_valid(&self) -> bool {
        self.dimensions_ok && self.opaque_ok
    }
}

/// Decode an icon and check its dimensions and opacity.
pub fn inspect(bytes: &[u8], policy: &IconPolicy) -> Result<IconInspection> {
    let image = image::load_from_memory(bytes).map_err(|e| Error::ImageDecode(e.to_string()))?;

    let (width, height) = image.dimensions();
    let inspection = IconInspection {
        width,
        height,
        expected_size: policy.size,
        dimensions_ok: policy.dimensions_ok(width, height),
        opaque_ok: is_opaque(&image),
    };

    debug!(
        "Icon {}x{} ({:?}): dimensions_ok={} opaque_ok={}",
        width,
        height,
        image.color(),
        inspection.dimensions_ok,
        inspection.opaque_ok
    );

    Ok(inspection)
}

/// Check that every pixel is fully opaque.
///
/// Images without an alpha channel are opaque by construction. Otherwise
/// pixels are scanned in raster order and the scan stops at the first one
/// with alpha below the maximum.
pub fn is_opaque(image: &DynamicImage) -> bool {
    if !image.color().has_alpha() {
        return true;
    }

    image.to_rgba16().pixels().all(|pixel| pixel.0[3] == u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encode_png, opaque_png, png_with_transparent_pixel};
    use image::{GrayAlphaImage, LumaA, Rgb, RgbImage};

    #[test]
    fn test_valid_icon() {
        let inspection = inspect(&opaque_png(128, 128), &IconPolicy::default()).unwrap();
        assert_eq!(inspection.width, 128);
        assert_eq!(inspection.height, 128);
        assert!(inspection.dimensions_ok);
        assert!(inspection.opaque_ok);
        assert!(inspection.is_valid());
    }

    #[test]
    fn test_both_dimensions_off_fails() {
        let inspection = inspect(&opaque_png(64, 32), &IconPolicy::default()).unwrap();
        assert!(!inspection.dimensions_ok);
        assert!(!inspection.is_valid());
    }

    #[test]
    fn test_single_dimension_off_passes_by_default() {
        let policy = IconPolicy::default();
        assert!(inspect(&opaque_png(128, 64), &policy).unwrap().is_valid());
        assert!(inspect(&opaque_png(200, 128), &policy).unwrap().is_valid());
    }

    #[test]
    fn test_single_dimension_off_fails_when_strict() {
        let policy = IconPolicy::new(128, true).unwrap();
        let inspection = inspect(&opaque_png(128, 64), &policy).unwrap();
        assert!(!inspection.dimensions_ok);
        assert!(inspection.opaque_ok);
    }

    #[test]
    fn test_transparent_pixel_fails() {
        let inspection =
            inspect(&png_with_transparent_pixel(128, 128, 127, 127, 254), &IconPolicy::default())
                .unwrap();
        assert!(inspection.dimensions_ok);
        assert!(!inspection.opaque_ok);

        let inspection =
            inspect(&png_with_transparent_pixel(128, 128, 0, 0, 0), &IconPolicy::default()).unwrap();
        assert!(!inspection.opaque_ok);
    }

    #[test]
    fn test_image_without_alpha_is_opaque() {
        let rgb = RgbImage::from_pixel(128, 128, Rgb([10, 20, 30]));
        let inspection =
            inspect(&encode_png(DynamicImage::ImageRgb8(rgb)), &IconPolicy::default()).unwrap();
        assert!(inspection.opaque_ok);
    }

    #[test]
    fn test_gray_alpha_image() {
        let mut gray = GrayAlphaImage::from_pixel(16, 16, LumaA([200, 255]));
        assert!(is_opaque(&DynamicImage::ImageLumaA8(gray.clone())));

        gray.put_pixel(3, 9, LumaA([200, 128]));
        assert!(!is_opaque(&DynamicImage::ImageLumaA8(gray)));
    }

    #[test]
    fn test_decode_error() {
        let err = inspect(b"definitely not a png", &IconPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::ImageDecode(_)));
    }
}
