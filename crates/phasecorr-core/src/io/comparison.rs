//! Side-by-side comparison figure for a registration.
//!
//! Layout (2 rows x 3 columns):
//!
//! | source | target  | \|source - target\|  |
//! | source | shifted | \|source - shifted\| |
//!
//! Difference panels are min-max normalized to the full 8-bit range.

use std::path::Path;

use image::{Rgb, RgbImage};
use ndarray::{ArrayView3, Zip};

use crate::error::{RegistrationError, Result};
use crate::frame::{as_planes, Image};

pub fn render_comparison(src: &Image, target: &Image, shifted: &Image) -> Result<RgbImage> {
    if src.shape() != target.shape() || src.shape() != shifted.shape() {
        return Err(RegistrationError::InvalidInput(format!(
            "comparison needs equal shapes, got {:?}, {:?}, {:?}",
            src.shape(),
            target.shape(),
            shifted.shape()
        )));
    }

    let src_planes = as_planes(src)?;
    let target_planes = as_planes(target)?;
    let shifted_planes = as_planes(shifted)?;
    let (h, w, _) = src_planes.dim();

    let before = difference(&src_planes, &target_planes);
    let after = difference(&src_planes, &shifted_planes);

    let panels = [
        [src.clone(), target.clone(), before],
        [src.clone(), shifted.clone(), after],
    ];

    let mut canvas = RgbImage::new((w * 3) as u32, (h * 2) as u32);
    for (panel_row, row) in panels.iter().enumerate() {
        for (panel_col, panel) in row.iter().enumerate() {
            blit(&mut canvas, &as_planes(panel)?, panel_row * h, panel_col * w);
        }
    }

    Ok(canvas)
}

pub fn save_comparison(src: &Image, target: &Image, shifted: &Image, path: &Path) -> Result<()> {
    render_comparison(src, target, shifted)?.save(path)?;
    Ok(())
}

/// `|a - b|` stretched so its minimum maps to 0 and its maximum to 255.
fn difference(a: &ArrayView3<u8>, b: &ArrayView3<u8>) -> Image {
    let diff = Zip::from(a)
        .and(b)
        .map_collect(|&x, &y| (x as f64 - y as f64).abs());

    let min = diff.iter().copied().fold(f64::INFINITY, f64::min);
    let max = diff.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    diff.mapv(|v| {
        if range > 0.0 {
            ((v - min) / range * 255.0).round() as u8
        } else {
            0
        }
    })
    .into_dyn()
}

fn blit(canvas: &mut RgbImage, panel: &ArrayView3<u8>, top: usize, left: usize) {
    let (h, w, channels) = panel.dim();
    for row in 0..h {
        for col in 0..w {
            let rgb = if channels >= 3 {
                [panel[[row, col, 0]], panel[[row, col, 1]], panel[[row, col, 2]]]
            } else {
                [panel[[row, col, 0]]; 3]
            };
            canvas.put_pixel((left + col) as u32, (top + row) as u32, Rgb(rgb));
        }
    }
}
