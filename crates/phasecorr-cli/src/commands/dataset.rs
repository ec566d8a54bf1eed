use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use phasecorr_core::consts::DEFAULT_DATASET_ROOT;
use phasecorr_core::io::dataset::Dataset;

use super::register::{register_pair, RegistrationOptions};

#[derive(Args)]
pub struct DatasetArgs {
    /// Dataset source name (saturn, sentinel2)
    pub source: String,

    /// Directory containing one sub-directory per source
    #[arg(long, default_value = DEFAULT_DATASET_ROOT)]
    pub root: PathBuf,

    /// Key of the source tile
    #[arg(long, default_value = "image_0")]
    pub src_key: String,

    /// Key of the target tile
    #[arg(long, default_value = "image_1")]
    pub target_key: String,

    #[command(flatten)]
    pub options: RegistrationOptions,
}

pub fn run(args: &DatasetArgs) -> Result<()> {
    let dataset = Dataset::from_name(&args.source, &args.root)?;
    let images = dataset
        .sample_images()
        .with_context(|| format!("Failed to read {}", dataset.source_dir().display()))?;

    println!(
        "Dataset {}: {} tiles in {}",
        dataset.source(),
        images.len(),
        dataset.source_dir().display()
    );

    let src = images
        .get(&args.src_key)
        .cloned()
        .with_context(|| format!("No tile named {}", args.src_key))?;
    let target = images
        .get(&args.target_key)
        .cloned()
        .with_context(|| format!("No tile named {}", args.target_key))?;

    register_pair(src, target, &args.options, &args.src_key, &args.target_key)
}
