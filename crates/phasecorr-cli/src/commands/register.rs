use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use phasecorr_core::align::PhaseCorrelation;
use phasecorr_core::config::{ChannelReduction, RegistrationConfig};
use phasecorr_core::frame::Image;
use phasecorr_core::io::comparison::save_comparison;
use phasecorr_core::io::image_io::{load_image, save_image};
use tracing::debug;

use super::config::load_config;
use crate::summary::print_registration_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum ChannelArg {
    /// Correlate on channel 0 only (default)
    First,
    /// Correlate on BT.601 luminance of the first three channels
    Luminance,
}

impl From<ChannelArg> for ChannelReduction {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::First => ChannelReduction::First,
            ChannelArg::Luminance => ChannelReduction::Luminance,
        }
    }
}

/// Options shared by every command that runs a registration.
#[derive(Args)]
pub struct RegistrationOptions {
    /// Resampling factor applied before correlation, in (0, 100)
    #[arg(long)]
    pub upscale: Option<f64>,

    /// Registration config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Channel used to drive correlation of multi-channel images
    #[arg(long, value_enum)]
    pub channel: Option<ChannelArg>,

    /// Output path for the shifted target
    #[arg(short, long, default_value = "shifted.png")]
    pub output: PathBuf,

    /// Also write a source/target/shifted comparison figure
    #[arg(long)]
    pub comparison: Option<PathBuf>,
}

impl RegistrationOptions {
    /// Config file values, overridden by any flags given on the command line.
    pub fn resolve_config(&self) -> Result<RegistrationConfig> {
        let mut config = match self.config {
            Some(ref path) => load_config(path)?,
            None => RegistrationConfig::default(),
        };
        if let Some(factor) = self.upscale {
            config.upscale_factor = factor;
        }
        if let Some(channel) = self.channel {
            config.channel_reduction = channel.into();
        }
        debug!(?config, "Registration config resolved");
        Ok(config)
    }
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Source (reference) image
    pub src: PathBuf,

    /// Target image to align onto the source
    pub target: PathBuf,

    #[command(flatten)]
    pub options: RegistrationOptions,
}

pub fn run(args: &RegisterArgs) -> Result<()> {
    let src = load_image(&args.src)
        .with_context(|| format!("Failed to load {}", args.src.display()))?;
    let target = load_image(&args.target)
        .with_context(|| format!("Failed to load {}", args.target.display()))?;

    register_pair(
        src,
        target,
        &args.options,
        &args.src.display().to_string(),
        &args.target.display().to_string(),
    )
}

/// Register `target` onto `src`, print the summary, and write the outputs.
pub fn register_pair(
    src: Image,
    target: Image,
    options: &RegistrationOptions,
    src_label: &str,
    target_label: &str,
) -> Result<()> {
    let config = options.resolve_config()?;
    let registration = PhaseCorrelation::with_config(src, target, config);
    let alignment = registration.transform().context("Registration failed")?;

    print_registration_summary(
        src_label,
        target_label,
        registration.src().shape(),
        registration.config(),
        &alignment,
    );

    save_image(&alignment.image, &options.output)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;
    println!("Saved to {}", options.output.display());

    if let Some(ref path) = options.comparison {
        save_comparison(
            registration.src(),
            registration.target(),
            &alignment.image,
            path,
        )
        .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Comparison saved to {}", path.display());
    }

    Ok(())
}
