use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::ModelError;

/// Pixel dimensions of an image used as network input or output.
///
/// Always passed explicitly alongside the flat pixel vector, so callers can
/// round-trip an image through a network without any shared image state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageShape {
    pub width: u32,
    pub height: u32,
}

impl ImageShape {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Decodes an image file, converts it to grayscale, and flattens it
/// row-major with every pixel normalized to [0, 1].
///
/// Returns the pixel vector together with the image's own dimensions.
pub fn grayscale_pixels<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, ImageShape), ModelError> {
    let img = image::open(path.as_ref())?;
    let gray = img.to_luma8();
    let shape = ImageShape {
        width: gray.width(),
        height: gray.height(),
    };
    let pixels = gray.pixels().map(|p| p.0[0] as f64 / 255.0).collect();
    Ok((pixels, shape))
}

/// Like [`grayscale_pixels`], but resizes to `shape` first. For networks
/// with a fixed input dimension fed from arbitrarily sized images.
pub fn grayscale_pixels_resized<P: AsRef<Path>>(
    path: P,
    shape: ImageShape,
) -> Result<Vec<f64>, ModelError> {
    let img = image::open(path.as_ref())?;
    let resized = img.resize_exact(
        shape.width,
        shape.height,
        image::imageops::FilterType::Lanczos3,
    );
    let gray = resized.to_luma8();
    Ok(gray.pixels().map(|p| p.0[0] as f64 / 255.0).collect())
}

/// Writes a [0, 1] vector back out as a grayscale image of the given
/// shape. Values outside [0, 1] are clamped.
pub fn write_grayscale<P: AsRef<Path>>(
    path: P,
    pixels: &[f64],
    shape: ImageShape,
) -> Result<(), ModelError> {
    if pixels.len() != shape.pixel_count() {
        return Err(ModelError::DimensionMismatch {
            context: format!("{}x{} image", shape.width, shape.height),
            expected: shape.pixel_count(),
            got: pixels.len(),
        });
    }

    let img = image::GrayImage::from_fn(shape.width, shape.height, |x, y| {
        let idx = y as usize * shape.width as usize + x as usize;
        image::Luma([(pixels[idx].clamp(0.0, 1.0) * 255.0).round() as u8])
    });
    img.save(path.as_ref())?;
    Ok(())
}
