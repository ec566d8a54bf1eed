use std::path::Path;

use image::{ColorType, DynamicImage, GrayImage, RgbImage, RgbaImage};
use ndarray::{Array2, Array3};
use tracing::debug;

use crate::error::{RegistrationError, Result};
use crate::frame::Image;

/// Load an image file as 8-bit samples.
///
/// Gray (with or without alpha) becomes `(height, width)`; RGB and RGBA become
/// `(height, width, 3)` and `(height, width, 4)`. Deeper formats are reduced
/// to 8 bits.
pub fn load_image(path: &Path) -> Result<Image> {
    let img = image::open(path)?;
    let image = dynamic_to_image(img)?;
    debug!(path = %path.display(), shape = ?image.shape(), "Image loaded");
    Ok(image)
}

pub fn dynamic_to_image(img: DynamicImage) -> Result<Image> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let image = match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            Array2::from_shape_vec((h, w), img.to_luma8().into_raw())
                .map_err(shape_error)?
                .into_dyn()
        }
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => {
            Array3::from_shape_vec((h, w, 3), img.to_rgb8().into_raw())
                .map_err(shape_error)?
                .into_dyn()
        }
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => {
            Array3::from_shape_vec((h, w, 4), img.to_rgba8().into_raw())
                .map_err(shape_error)?
                .into_dyn()
        }
        other => {
            return Err(RegistrationError::UnsupportedColorType(format!(
                "{other:?}"
            )))
        }
    };
    Ok(image)
}

/// Save an image, choosing the format from the file extension.
///
/// 2-D images are written as gray; 3-D images need 1, 3 or 4 channels.
pub fn save_image(image: &Image, path: &Path) -> Result<()> {
    let shape = image.shape();
    let (h, w) = match shape {
        [h, w] | [h, w, _] => (*h as u32, *w as u32),
        _ => {
            return Err(RegistrationError::InvalidInput(format!(
                "cannot save an image of shape {shape:?}"
            )))
        }
    };
    let channels = if shape.len() == 2 { 1 } else { shape[2] };
    let pixels: Vec<u8> = image.iter().copied().collect();

    let dynamic = match channels {
        1 => GrayImage::from_raw(w, h, pixels).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgba8),
        n => {
            return Err(RegistrationError::UnsupportedColorType(format!(
                "{n} channels"
            )))
        }
    }
    .ok_or_else(|| RegistrationError::InvalidInput("pixel buffer does not match shape".into()))?;

    dynamic.save(path)?;
    debug!(path = %path.display(), "Image saved");
    Ok(())
}

fn shape_error(e: ndarray::ShapeError) -> RegistrationError {
    RegistrationError::InvalidInput(e.to_string())
}
