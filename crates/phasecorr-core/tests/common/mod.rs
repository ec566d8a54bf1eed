#![allow(dead_code)]

use ndarray::{Array2, Array3, Axis};
use phasecorr_core::frame::{Image, ShiftVector};

/// Deterministic pseudo-random texture in `[0, 255]`.
pub fn textured(h: usize, w: usize, seed: u64) -> Array2<u8> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    Array2::from_shape_fn((h, w), |_| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 56) as u8
    })
}

/// Linear ramp `base + dy * row + dx * col`.
pub fn ramp(h: usize, w: usize, base: f64, dy: f64, dx: f64) -> Array2<u8> {
    Array2::from_shape_fn((h, w), |(r, c)| (base + dy * r as f64 + dx * c as f64) as u8)
}

/// Circular translation: `out[(r + dy) mod h, (c + dx) mod w] = input[r, c]`.
pub fn roll(input: &Array2<u8>, dy: isize, dx: isize) -> Array2<u8> {
    let (h, w) = input.dim();
    Array2::from_shape_fn((h, w), |(r, c)| {
        let src_r = (r as isize - dy).rem_euclid(h as isize) as usize;
        let src_c = (c as isize - dx).rem_euclid(w as isize) as usize;
        input[[src_r, src_c]]
    })
}

/// Stack 2-D planes into a `(height, width, channels)` image.
pub fn stack_channels(planes: &[Array2<u8>]) -> Image {
    let (h, w) = planes[0].dim();
    let mut out = Array3::<u8>::zeros((h, w, planes.len()));
    for (ch, plane) in planes.iter().enumerate() {
        out.index_axis_mut(Axis(2), ch).assign(plane);
    }
    out.into_dyn()
}

/// Largest absolute per-sample difference of two equally shaped images.
pub fn max_abs_diff(a: &Image, b: &Image) -> u8 {
    assert_eq!(a.shape(), b.shape());
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| x.abs_diff(y))
        .max()
        .unwrap_or(0)
}

/// Euclidean distance between two shifts.
pub fn shift_error(a: &ShiftVector, b: &ShiftVector) -> f64 {
    (a.row - b.row).hypot(a.col - b.col)
}
