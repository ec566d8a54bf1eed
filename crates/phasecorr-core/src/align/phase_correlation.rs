//! Translation registration by FFT phase correlation.
//!
//! The cross-power spectrum of two images that differ by a pure translation is
//! a complex exponential whose phase slope encodes the shift. Its inverse
//! transform peaks at the offset, wrapped periodically over the image extent.

use std::borrow::Cow;

use ndarray::{Array2, ArrayView3, Axis, Zip};
use num_complex::Complex;
use tracing::{debug, info};

use crate::config::{ChannelReduction, RegistrationConfig};
use crate::consts::{IDENTITY_SCALE, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, MAX_UPSCALE_FACTOR};
use crate::error::{RegistrationError, Result};
use crate::frame::{as_planes, Alignment, Image, ShiftVector};
use crate::resample::{resample, restore};

use super::shift::shift_image;
use super::spectral::{inverse_transform, to_frequency_domain};

/// Correlation surface of two working images.
#[derive(Clone, Debug)]
pub struct CrossCorrelation {
    /// Inverse DFT of `S * conj(T)`.
    pub surface: Array2<Complex<f64>>,
    /// `(height, width)` of the working images after resampling.
    pub shape: (usize, usize),
}

/// A registration of `target` onto `src`.
///
/// Takes ownership of both images so nothing the caller does afterwards can
/// change what is being registered.
#[derive(Clone, Debug)]
pub struct PhaseCorrelation {
    src: Image,
    target: Image,
    config: RegistrationConfig,
}

impl PhaseCorrelation {
    pub fn new(src: Image, target: Image, upscale_factor: f64) -> Self {
        Self::with_config(src, target, RegistrationConfig::new(upscale_factor))
    }

    pub fn with_config(src: Image, target: Image, config: RegistrationConfig) -> Self {
        Self {
            src,
            target,
            config,
        }
    }

    pub fn src(&self) -> &Image {
        &self.src
    }

    pub fn target(&self) -> &Image {
        &self.target
    }

    pub fn config(&self) -> &RegistrationConfig {
        &self.config
    }

    pub fn validate(&self) -> Result<()> {
        validate_inputs(&self.src, &self.target, self.config.upscale_factor)
    }

    pub fn cross_correlation(&self) -> Result<CrossCorrelation> {
        cross_correlate_with(&self.src, &self.target, &self.config)
    }

    /// Shift of the target relative to the source at working resolution.
    pub fn get_shift(&self) -> Result<ShiftVector> {
        estimate_shift_with(&self.src, &self.target, &self.config)
    }

    pub fn transform(&self) -> Result<Alignment> {
        apply_shift_with(&self.src, &self.target, &self.config)
    }
}

/// Cross-correlate with the default channel reduction.
pub fn cross_correlate(src: &Image, target: &Image, upscale_factor: f64) -> Result<CrossCorrelation> {
    cross_correlate_with(src, target, &RegistrationConfig::new(upscale_factor))
}

pub fn cross_correlate_with(
    src: &Image,
    target: &Image,
    config: &RegistrationConfig,
) -> Result<CrossCorrelation> {
    let factor = config.upscale_factor;
    validate_inputs(src, target, factor)?;

    let src_work = working_image(src, factor)?;
    let target_work = working_image(target, factor)?;

    let src_plane = reduce_channels(&as_planes(&src_work)?, config.channel_reduction);
    let target_plane = reduce_channels(&as_planes(&target_work)?, config.channel_reduction);
    let shape = src_plane.dim();
    debug!(height = shape.0, width = shape.1, factor, "Working images prepared");

    let src_freq = to_frequency_domain(&src_plane.view());
    let target_freq = to_frequency_domain(&target_plane.view());

    let product = Zip::from(&src_freq)
        .and(&target_freq)
        .map_collect(|&s, &t| s * t.conj());

    Ok(CrossCorrelation {
        surface: inverse_transform(&product),
        shape,
    })
}

/// Estimate the shift with the default channel reduction.
pub fn estimate_shift(src: &Image, target: &Image, upscale_factor: f64) -> Result<ShiftVector> {
    estimate_shift_with(src, target, &RegistrationConfig::new(upscale_factor))
}

pub fn estimate_shift_with(
    src: &Image,
    target: &Image,
    config: &RegistrationConfig,
) -> Result<ShiftVector> {
    let correlation = cross_correlate_with(src, target, config)?;
    let (h, w) = correlation.shape;

    let (peak_row, peak_col, peak_mag) = find_peak(&correlation.surface);
    debug!(peak_row, peak_col, peak_mag, "Correlation peak located");

    Ok(ShiftVector::new(
        unwrap_peak(peak_row, h),
        unwrap_peak(peak_col, w),
    ))
}

/// Register and shift with the default channel reduction.
pub fn apply_shift(src: &Image, target: &Image, upscale_factor: f64) -> Result<Alignment> {
    apply_shift_with(src, target, &RegistrationConfig::new(upscale_factor))
}

/// Translate `target` onto `src` and report the detected shift in
/// original-resolution pixels.
pub fn apply_shift_with(
    src: &Image,
    target: &Image,
    config: &RegistrationConfig,
) -> Result<Alignment> {
    let factor = config.upscale_factor;
    let working_shift = estimate_shift_with(src, target, config)?;
    let shift = working_shift.unscaled(factor);
    info!(row = shift.row, col = shift.col, "Detected shift: {shift}");

    let working = working_image(target, factor)?;
    let shifted = shift_image(&working, working_shift)?;

    let image = if factor != IDENTITY_SCALE {
        restore(&shifted, target.shape(), factor)?
    } else {
        shifted
    };

    Ok(Alignment {
        shift,
        working_shift,
        image,
    })
}

/// Location and magnitude of the largest `|value|`.
///
/// Cells are scanned in row-major order and only a strictly larger magnitude
/// replaces the current best, so the first maximum wins ties.
pub fn find_peak(surface: &Array2<Complex<f64>>) -> (usize, usize, f64) {
    let mut best_row = 0;
    let mut best_col = 0;
    let mut best_val = f64::NEG_INFINITY;

    for ((row, col), value) in surface.indexed_iter() {
        let mag = value.norm();
        if mag > best_val {
            best_val = mag;
            best_row = row;
            best_col = col;
        }
    }

    (best_row, best_col, best_val)
}

/// Map a circular peak index onto a signed displacement.
///
/// Indices past the midpoint `extent / 2` belong to negative shifts.
pub fn unwrap_peak(index: usize, extent: usize) -> f64 {
    let midpoint = extent / 2;
    if index > midpoint {
        index as f64 - extent as f64
    } else {
        index as f64
    }
}

/// `image` resampled by `factor`, borrowed untouched at the identity scale.
fn working_image(image: &Image, factor: f64) -> Result<Cow<'_, Image>> {
    if factor != IDENTITY_SCALE {
        Ok(Cow::Owned(resample(image, factor)?))
    } else {
        Ok(Cow::Borrowed(image))
    }
}

fn validate_inputs(src: &Image, target: &Image, upscale_factor: f64) -> Result<()> {
    if src.shape() != target.shape() {
        return Err(RegistrationError::InvalidInput(format!(
            "shape mismatch: source {:?} vs target {:?}",
            src.shape(),
            target.shape()
        )));
    }

    for (name, image) in [("source", src), ("target", target)] {
        if !matches!(image.ndim(), 2 | 3) {
            return Err(RegistrationError::InvalidInput(format!(
                "{name} image must have 2 or 3 dimensions, got {}",
                image.ndim()
            )));
        }
    }

    if !(upscale_factor > 0.0 && upscale_factor < MAX_UPSCALE_FACTOR) {
        return Err(RegistrationError::InvalidInput(format!(
            "upscale factor must lie in (0, {MAX_UPSCALE_FACTOR}), got {upscale_factor}"
        )));
    }

    if src.is_empty() {
        return Err(RegistrationError::InvalidInput(format!(
            "images must not be empty, got shape {:?}",
            src.shape()
        )));
    }

    Ok(())
}

/// Collapse `(height, width, channels)` to the plane that drives correlation.
fn reduce_channels(planes: &ArrayView3<u8>, reduction: ChannelReduction) -> Array2<f64> {
    let channels = planes.len_of(Axis(2));
    match reduction {
        ChannelReduction::Luminance if channels >= 3 => {
            let r = planes.index_axis(Axis(2), 0);
            let g = planes.index_axis(Axis(2), 1);
            let b = planes.index_axis(Axis(2), 2);
            Zip::from(&r).and(&g).and(&b).map_collect(|&r, &g, &b| {
                LUMINANCE_R * r as f64 + LUMINANCE_G * g as f64 + LUMINANCE_B * b as f64
            })
        }
        _ => planes.index_axis(Axis(2), 0).mapv(f64::from),
    }
}
