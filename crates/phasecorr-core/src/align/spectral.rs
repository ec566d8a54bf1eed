use std::sync::Arc;

use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView2, ArrayViewMut1, Axis};
use num_complex::Complex;
use num_traits::AsPrimitive;
use rustfft::{Fft, FftPlanner};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Forward 2D DFT of a single-channel image, unnormalized.
pub fn to_frequency_domain<A>(image: &ArrayView2<A>) -> Array2<Complex<f64>>
where
    A: AsPrimitive<f64>,
{
    let (h, w) = image.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = image.mapv(|v| Complex::new(v.as_(), 0.0));
    let parallel = h * w >= PARALLEL_PIXEL_THRESHOLD;

    transform_lanes(&mut result, Axis(0), &fft_row, parallel);
    transform_lanes(&mut result, Axis(1), &fft_col, parallel);

    result
}

/// Inverse 2D DFT, normalized by `1/(h*w)`. The complex result is kept.
pub fn inverse_transform(spectrum: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let (h, w) = spectrum.dim();
    let mut planner = FftPlanner::new();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = spectrum.clone();
    let parallel = h * w >= PARALLEL_PIXEL_THRESHOLD;

    transform_lanes(&mut work, Axis(1), &ifft_col, parallel);
    transform_lanes(&mut work, Axis(0), &ifft_row, parallel);

    let scale = 1.0 / (h * w) as f64;
    work.mapv_inplace(|v| v * scale);
    work
}

/// Run `fft` over every lane produced by iterating `axis`.
///
/// `Axis(0)` yields rows, `Axis(1)` yields columns. Each lane is transformed
/// independently, so the parallel and sequential paths agree bit for bit.
fn transform_lanes(
    data: &mut Array2<Complex<f64>>,
    axis: Axis,
    fft: &Arc<dyn Fft<f64>>,
    parallel: bool,
) {
    if parallel {
        data.axis_iter_mut(axis)
            .into_par_iter()
            .for_each(|lane| transform_lane(lane, fft.as_ref()));
    } else {
        for lane in data.axis_iter_mut(axis) {
            transform_lane(lane, fft.as_ref());
        }
    }
}

fn transform_lane(mut lane: ArrayViewMut1<Complex<f64>>, fft: &dyn Fft<f64>) {
    let mut buffer: Vec<Complex<f64>> = lane.to_vec();
    fft.process(&mut buffer);
    for (dst, src) in lane.iter_mut().zip(buffer) {
        *dst = src;
    }
}
