mod common;

use approx::assert_abs_diff_eq;
use ndarray::{array, Array2, Array3, Axis};

use phasecorr_core::align::shift::{bilinear_sample, shift_image, shift_plane};
use phasecorr_core::error::RegistrationError;
use phasecorr_core::frame::{quantize, ShiftVector};

#[test]
fn test_bilinear_interpolation() {
    let mut data = Array2::<u8>::zeros((4, 4));
    data[[1, 1]] = 100;
    let view = data.view();

    // Exact point
    assert_abs_diff_eq!(bilinear_sample(&view, 1.0, 1.0, 0.0), 100.0);
    // Halfway between
    assert_abs_diff_eq!(bilinear_sample(&view, 1.0, 1.5, 0.0), 50.0);
    assert_abs_diff_eq!(bilinear_sample(&view, 1.5, 1.5, 0.0), 25.0);
}

#[test]
fn test_bilinear_uses_fill_outside() {
    let data = Array2::<u8>::from_elem((2, 2), 10);
    let view = data.view();

    assert_abs_diff_eq!(bilinear_sample(&view, -1.0, 0.0, 90.0), 90.0);
    assert_abs_diff_eq!(bilinear_sample(&view, 1.5, 0.0, 90.0), 50.0);
}

#[test]
fn test_integer_shift_fills_with_mean() {
    let image = array![[10u8, 20, 30], [40, 50, 60], [70, 80, 90]].into_dyn();

    let shifted = shift_image(&image, ShiftVector::new(1.0, -1.0)).unwrap();
    // mean = 50
    assert_eq!(
        shifted,
        array![[50u8, 50, 50], [20, 30, 50], [50, 60, 50]].into_dyn()
    );
}

#[test]
fn test_zero_shift_is_identity() {
    let image = common::textured(9, 7, 3).into_dyn();
    assert_eq!(shift_image(&image, ShiftVector::default()).unwrap(), image);
}

#[test]
fn test_fractional_shift_interpolates() {
    let plane = array![[0u8, 100, 200, 100]];
    let shifted = shift_plane(&plane.view(), ShiftVector::new(0.0, 0.5), 0.0);
    // output[c] = input[c - 0.5]
    assert_eq!(shifted, array![[0u8, 50, 150, 150]]);
}

#[test]
fn test_color_channels_use_their_own_fill() {
    let mut image = Array3::<u8>::zeros((3, 3, 2));
    image.index_axis_mut(Axis(2), 0).fill(30);
    image.index_axis_mut(Axis(2), 1).fill(200);
    image[[0, 0, 1]] = 2;

    let shifted = shift_image(&image.into_dyn(), ShiftVector::new(0.0, 2.0)).unwrap();
    assert_eq!(shifted.shape(), &[3, 3, 2]);

    // Channel 0 is constant, so the fill matches everywhere
    assert!(shifted.index_axis(Axis(2), 0).iter().all(|&v| v == 30));

    // Channel 1 mean = (8 * 200 + 2) / 9 = 178
    let expected_fill = quantize((8.0 * 200.0 + 2.0) / 9.0);
    assert_eq!(shifted[[0, 0, 1]], expected_fill);
    assert_eq!(shifted[[0, 1, 1]], expected_fill);
    assert_eq!(shifted[[0, 2, 1]], 2);
    assert_eq!(shifted[[1, 2, 1]], 200);
}

#[test]
fn test_shift_rejects_one_dimensional() {
    let image = ndarray::ArrayD::<u8>::zeros(ndarray::IxDyn(&[5]));
    assert!(matches!(
        shift_image(&image, ShiftVector::default()),
        Err(RegistrationError::InvalidInput(_))
    ));
}

#[test]
fn test_quantize_rounds_and_clips() {
    assert_eq!(quantize(-4.0), 0);
    assert_eq!(quantize(12.4), 12);
    assert_eq!(quantize(12.5), 13);
    assert_eq!(quantize(300.0), 255);
    assert_eq!(quantize(f64::NAN), 0);
}

#[test]
fn test_shift_vector_unscaled_and_display() {
    let shift = ShiftVector::new(-6.0, 10.0).unscaled(4.0);
    assert_eq!(shift, ShiftVector::new(-1.5, 2.5));
    assert_eq!(shift.to_string(), "[-1.5, 2.5]");
}
