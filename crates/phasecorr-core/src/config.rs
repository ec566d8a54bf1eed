use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::IDENTITY_SCALE;

/// How a multi-channel image is collapsed to the single plane that drives
/// correlation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelReduction {
    /// Use channel 0 only.
    #[default]
    First,
    /// ITU-R BT.601 weighted sum of the first three channels.
    Luminance,
}

impl fmt::Display for ChannelReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelReduction::First => write!(f, "First channel"),
            ChannelReduction::Luminance => write!(f, "Luminance"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Resampling factor applied before correlation, in (0, 100).
    #[serde(default = "default_upscale_factor")]
    pub upscale_factor: f64,
    #[serde(default)]
    pub channel_reduction: ChannelReduction,
}

impl RegistrationConfig {
    pub fn new(upscale_factor: f64) -> Self {
        Self {
            upscale_factor,
            ..Self::default()
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            upscale_factor: default_upscale_factor(),
            channel_reduction: ChannelReduction::default(),
        }
    }
}

fn default_upscale_factor() -> f64 {
    IDENTITY_SCALE
}
