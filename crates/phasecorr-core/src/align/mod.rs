pub mod phase_correlation;
pub mod shift;
pub mod spectral;

pub use phase_correlation::{
    apply_shift, apply_shift_with, cross_correlate, cross_correlate_with, estimate_shift,
    estimate_shift_with, CrossCorrelation, PhaseCorrelation,
};
pub use shift::{bilinear_sample, shift_image};
