//! Scalar resampling of 8-bit images.
//!
//! Factors above one upsample with linear interpolation, factors at or below
//! one downsample by block averaging. The channel axis of a 3-D image is never
//! resampled. [`restore`] maps a resampled image back onto its source grid.

use ndarray::{Array3, ArrayView3, Axis};

use crate::error::{RegistrationError, Result};
use crate::frame::{as_planes, from_planes, quantize, Image};

/// Resample `image` by `scale` along its spatial axes.
pub fn resample(image: &Image, scale: f64) -> Result<Image> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RegistrationError::InvalidInput(format!(
            "resample scale must be a positive finite number, got {scale}"
        )));
    }

    let grayscale = image.ndim() == 2;
    let planes = as_planes(image)?;
    let resampled = if scale > 1.0 {
        upsample_linear(&planes, scale)
    } else {
        downsample_mean(&planes, block_size(scale))
    };

    Ok(from_planes(resampled, grayscale))
}

/// Block edge used when downsampling by `scale`.
pub fn block_size(scale: f64) -> usize {
    ((1.0 / scale).round() as usize).max(1)
}

/// Output extent of a spatial axis of length `n` upsampled by `scale`.
pub fn upsampled_extent(n: usize, scale: f64) -> usize {
    (n as f64 * scale).round() as usize
}

/// Map `working`, produced by `resample(original, scale)`, back onto the pixel
/// grid of `original`, whose shape is `shape`.
///
/// When `1 / scale` undoes the resampling exactly this is plain
/// `resample(working, 1 / scale)`. Otherwise every original pixel is
/// interpolated between the working samples whose footprints enclose it, and
/// zero-padded edge blocks are scaled back up by their coverage, so
/// non-integer factors land on the same pixels they came from.
pub fn restore(working: &Image, shape: &[usize], scale: f64) -> Result<Image> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RegistrationError::InvalidInput(format!(
            "restore scale must be a positive finite number, got {scale}"
        )));
    }
    if working.ndim() != shape.len() {
        return Err(RegistrationError::InvalidInput(format!(
            "cannot restore a {}-D image to shape {shape:?}",
            working.ndim()
        )));
    }

    let grayscale = working.ndim() == 2;
    let planes = as_planes(working)?;
    let (working_h, working_w, channels) = planes.dim();
    let (h, w) = match shape {
        [h, w] => (*h, *w),
        [h, w, c] if *c == channels => (*h, *w),
        _ => {
            return Err(RegistrationError::InvalidInput(format!(
                "cannot restore shape {:?} to {shape:?}",
                working.shape()
            )))
        }
    };
    if planes.is_empty() && h * w > 0 {
        return Err(RegistrationError::InvalidInput(
            "cannot restore an empty image".into(),
        ));
    }

    if inverts_exactly(scale, h) && inverts_exactly(scale, w) {
        return resample(working, 1.0 / scale);
    }

    let row_taps = restore_taps(h, working_h, scale);
    let col_taps = restore_taps(w, working_w, scale);
    Ok(from_planes(interpolate(&planes, &row_taps, &col_taps), grayscale))
}

/// Whether resampling by `1 / scale` returns an axis of length `n` to its
/// original grid.
fn inverts_exactly(scale: f64, n: usize) -> bool {
    if scale == 1.0 {
        return true;
    }
    if scale > 1.0 {
        return scale.fract() == 0.0;
    }
    let block = block_size(scale);
    (scale * block as f64 - 1.0).abs() < 1e-9 && n % block == 0
}

/// Taps that carry an axis of `working_n` resampled samples back to `n`
/// original pixels.
fn restore_taps(n: usize, working_n: usize, scale: f64) -> Vec<LinearTap> {
    // Centre of each working sample in original pixel coordinates, and the
    // gain that undoes zero padding in a partial block.
    let (centres, gains): (Vec<f64>, Vec<f64>) = if scale > 1.0 {
        (0..working_n)
            .map(|u| ((u as f64 + 0.5) * n as f64 / working_n as f64 - 0.5, 1.0))
            .unzip()
    } else {
        let block = block_size(scale);
        (0..working_n)
            .map(|j| {
                let covered = block.min(n.saturating_sub(j * block)).max(1);
                let centre = (j * block) as f64 + (covered as f64 - 1.0) / 2.0;
                (centre, block as f64 / covered as f64)
            })
            .unzip()
    };

    (0..n)
        .map(|o| {
            if working_n == 1 {
                return LinearTap::weighted(0, 0, gains[0], 0.0);
            }
            let pos = o as f64;
            let next = centres.partition_point(|&c| c <= pos);
            let lo = next.clamp(1, working_n - 1) - 1;
            let hi = lo + 1;
            // Outside the first or last centre this extrapolates.
            let frac = (pos - centres[lo]) / (centres[hi] - centres[lo]);
            LinearTap::weighted(lo, hi, (1.0 - frac) * gains[lo], frac * gains[hi])
        })
        .collect()
}

fn upsample_linear(data: &ArrayView3<u8>, scale: f64) -> Array3<u8> {
    let (h, w, _) = data.dim();
    let out_h = upsampled_extent(h, scale);
    let out_w = upsampled_extent(w, scale);

    let row_taps: Vec<LinearTap> = (0..out_h).map(|o| LinearTap::resize(o, h, out_h)).collect();
    let col_taps: Vec<LinearTap> = (0..out_w).map(|o| LinearTap::resize(o, w, out_w)).collect();

    interpolate(data, &row_taps, &col_taps)
}

/// Separable two-tap interpolation: output `(row, col)` mixes the four input
/// samples named by `row_taps[row]` and `col_taps[col]`.
fn interpolate(
    data: &ArrayView3<u8>,
    row_taps: &[LinearTap],
    col_taps: &[LinearTap],
) -> Array3<u8> {
    let channels = data.len_of(Axis(2));

    Array3::from_shape_fn((row_taps.len(), col_taps.len(), channels), |(row, col, ch)| {
        let ty = &row_taps[row];
        let tx = &col_taps[col];

        let v00 = data[[ty.lo, tx.lo, ch]] as f64;
        let v01 = data[[ty.lo, tx.hi, ch]] as f64;
        let v10 = data[[ty.hi, tx.lo, ch]] as f64;
        let v11 = data[[ty.hi, tx.hi, ch]] as f64;

        let top = v00 * tx.w_lo + v01 * tx.w_hi;
        let bottom = v10 * tx.w_lo + v11 * tx.w_hi;
        quantize(top * ty.w_lo + bottom * ty.w_hi)
    })
}

/// Two neighbouring input samples and their weights.
struct LinearTap {
    lo: usize,
    hi: usize,
    w_lo: f64,
    w_hi: f64,
}

impl LinearTap {
    fn weighted(lo: usize, hi: usize, w_lo: f64, w_hi: f64) -> Self {
        Self { lo, hi, w_lo, w_hi }
    }

    /// Map output index `o` of an axis resized from `n` to `out_n` samples onto
    /// the input grid, aligning pixel centres.
    fn resize(o: usize, n: usize, out_n: usize) -> Self {
        let coord = (o as f64 + 0.5) * n as f64 / out_n as f64 - 0.5;
        let coord = mirror(coord, n);
        let lo = coord.floor() as usize;
        let frac = coord - lo as f64;
        Self::weighted(lo, (lo + 1).min(n - 1), 1.0 - frac, frac)
    }
}

/// Reflect a coordinate that falls off either end of `[0, n - 1]`.
fn mirror(coord: f64, n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let max = (n - 1) as f64;
    let reflected = if coord < 0.0 {
        -coord
    } else if coord > max {
        2.0 * max - coord
    } else {
        coord
    };
    reflected.clamp(0.0, max)
}

/// Average non-overlapping `block`x`block` tiles. Partial tiles at the right
/// and bottom edges are zero-padded, so they darken rather than shrink.
fn downsample_mean(data: &ArrayView3<u8>, block: usize) -> Array3<u8> {
    let (h, w, channels) = data.dim();
    if block == 1 {
        return data.to_owned();
    }

    let out_h = h.div_ceil(block);
    let out_w = w.div_ceil(block);
    let area = (block * block) as f64;

    Array3::from_shape_fn((out_h, out_w, channels), |(row, col, ch)| {
        let rows = row * block..((row + 1) * block).min(h);
        let cols = col * block..((col + 1) * block).min(w);
        let mut sum = 0.0f64;
        for r in rows {
            for c in cols.clone() {
                sum += data[[r, c, ch]] as f64;
            }
        }
        quantize(sum / area)
    })
}
