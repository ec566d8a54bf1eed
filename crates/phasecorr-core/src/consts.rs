/// Minimum pixel count (h*w) to use line-level Rayon parallelism in the FFT passes.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Exclusive upper bound on the upscale factor.
pub const MAX_UPSCALE_FACTOR: f64 = 100.0;

/// Upscale factor that disables resampling.
pub const IDENTITY_SCALE: f64 = 1.0;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.114;

/// Side length of the top-left window dataset images are cropped to.
pub const DATASET_CUT_OFF: usize = 200;

/// File extension of dataset tiles.
pub const DATASET_EXTENSION: &str = "tiff";

/// Directory that holds one sub-directory per dataset source.
pub const DEFAULT_DATASET_ROOT: &str = "data";
