use std::fmt;

use ndarray::{Array3, ArrayD, ArrayView3, Axis, Ix2, Ix3};

use crate::error::{RegistrationError, Result};

/// An 8-bit image, either grayscale `(height, width)` or
/// multi-channel `(height, width, channels)`.
pub type Image = ArrayD<u8>;

/// Translation of the target relative to the source, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShiftVector {
    pub row: f64,
    pub col: f64,
}

impl ShiftVector {
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    /// Divide both components by `factor`, converting a working-resolution
    /// shift back to original-resolution pixels.
    pub fn unscaled(&self, factor: f64) -> Self {
        Self {
            row: self.row / factor,
            col: self.col / factor,
        }
    }
}

impl fmt::Display for ShiftVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// Result of registering a target against a source.
#[derive(Clone, Debug)]
pub struct Alignment {
    /// Detected shift in original-resolution pixels.
    pub shift: ShiftVector,
    /// Detected shift at the resampled working resolution.
    pub working_shift: ShiftVector,
    /// Target translated onto the source, same shape as the input target.
    pub image: Image,
}

/// Round and clip a sample to the `u8` range. NaN maps to 0.
pub fn quantize(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// View any 2-D or 3-D image as `(height, width, channels)`.
///
/// Grayscale images get a trailing channel axis of length one.
pub fn as_planes(image: &Image) -> Result<ArrayView3<'_, u8>> {
    match image.ndim() {
        2 => Ok(image
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| RegistrationError::InvalidInput(e.to_string()))?
            .insert_axis(Axis(2))),
        3 => image
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|e| RegistrationError::InvalidInput(e.to_string())),
        n => Err(RegistrationError::InvalidInput(format!(
            "expected a 2-D or 3-D image, got {n} dimensions"
        ))),
    }
}

/// Inverse of [`as_planes`]: drop the channel axis again when the original
/// image was grayscale.
pub fn from_planes(planes: Array3<u8>, grayscale: bool) -> Image {
    if grayscale {
        planes.index_axis_move(Axis(2), 0).into_dyn()
    } else {
        planes.into_dyn()
    }
}
