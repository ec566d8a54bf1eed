use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::error::Result;
use crate::frame::{as_planes, from_planes, quantize, Image, ShiftVector};

/// Translate every channel of `image` by `shift`.
///
/// `output[r, c] = input[r - shift.row, c - shift.col]`. Pixels uncovered by
/// the translation take the mean of their channel, measured before shifting.
pub fn shift_image(image: &Image, shift: ShiftVector) -> Result<Image> {
    let grayscale = image.ndim() == 2;
    let planes = as_planes(image)?;
    let (h, w, channels) = planes.dim();

    let mut result = Array3::<u8>::zeros((h, w, channels));
    for ch in 0..channels {
        let plane = planes.index_axis(Axis(2), ch);
        let fill = plane_mean(&plane);
        let shifted = shift_plane(&plane, shift, fill);
        result.index_axis_mut(Axis(2), ch).assign(&shifted);
    }

    Ok(from_planes(result, grayscale))
}

/// Translate a single plane, filling uncovered pixels with `fill`.
pub fn shift_plane(plane: &ArrayView2<u8>, shift: ShiftVector, fill: f64) -> Array2<u8> {
    Array2::from_shape_fn(plane.dim(), |(row, col)| {
        let src_y = row as f64 - shift.row;
        let src_x = col as f64 - shift.col;
        quantize(bilinear_sample(plane, src_y, src_x, fill))
    })
}

/// Bilinear sample at fractional `(y, x)`; neighbours outside the plane read
/// as `fill`. Integer coordinates return the stored sample exactly.
pub fn bilinear_sample(data: &ArrayView2<u8>, y: f64, x: f64, fill: f64) -> f64 {
    let (h, w) = data.dim();

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let sample = |r: i64, c: i64| -> f64 {
        if r >= 0 && r < h as i64 && c >= 0 && c < w as i64 {
            data[[r as usize, c as usize]] as f64
        } else {
            fill
        }
    };

    let v00 = sample(y0, x0);
    let v10 = sample(y0, x1);
    let v01 = sample(y1, x0);
    let v11 = sample(y1, x1);

    v00 * (1.0 - fx) * (1.0 - fy) + v10 * fx * (1.0 - fy) + v01 * (1.0 - fx) * fy + v11 * fx * fy
}

fn plane_mean(plane: &ArrayView2<u8>) -> f64 {
    if plane.is_empty() {
        return 0.0;
    }
    plane.iter().map(|&v| v as f64).sum::<f64>() / plane.len() as f64
}
