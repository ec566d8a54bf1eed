//! Named collections of sample tiles on disk.
//!
//! A dataset lives in `<root>/<source>/` as a flat directory of `.tiff` tiles.
//! Each tile is cropped to a fixed top-left window so any two tiles of a source
//! can be registered against each other.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ndarray::Slice;
use rayon::prelude::*;
use tracing::info;

use crate::consts::{DATASET_CUT_OFF, DATASET_EXTENSION};
use crate::error::{RegistrationError, Result};
use crate::frame::Image;

use super::image_io::load_image;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Saturn,
    Sentinel2,
}

impl ImageSource {
    /// Directory name of the source below the dataset root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ImageSource::Saturn => "saturn",
            ImageSource::Sentinel2 => "sentinel2",
        }
    }
}

impl FromStr for ImageSource {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "saturn" => Ok(ImageSource::Saturn),
            "sentinel2" => Ok(ImageSource::Sentinel2),
            other => Err(RegistrationError::UnknownSource(other.to_string())),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[derive(Clone, Debug)]
pub struct Dataset {
    source: ImageSource,
    root: PathBuf,
}

impl Dataset {
    pub fn new(source: ImageSource, root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            root: root.into(),
        }
    }

    /// Parse `name` as an [`ImageSource`], failing with `UnknownSource`.
    pub fn from_name(name: &str, root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(name.parse()?, root))
    }

    pub fn source(&self) -> ImageSource {
        self.source
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(self.source.dir_name())
    }

    /// Load every tile of the source, cropped to `DATASET_CUT_OFF` pixels
    /// square, keyed `image_0`, `image_1`, ... in file-name order.
    pub fn sample_images(&self) -> Result<BTreeMap<String, Image>> {
        let dir = self.source_dir();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        paths.retain(|p| is_tile(p));
        paths.sort();

        let images = paths
            .par_iter()
            .enumerate()
            .map(|(counter, path)| {
                let image = load_image(path)?;
                Ok((format!("image_{counter}"), crop_window(&image, DATASET_CUT_OFF)))
            })
            .collect::<Result<BTreeMap<String, Image>>>()?;

        info!(source = %self.source, count = images.len(), "Dataset sampled");
        Ok(images)
    }
}

/// Keep the top-left `cut_off` x `cut_off` window of the spatial axes.
pub fn crop_window(image: &Image, cut_off: usize) -> Image {
    image
        .slice_each_axis(|ax| {
            if ax.axis.index() < 2 {
                Slice::from(..cut_off.min(ax.len))
            } else {
                Slice::from(..)
            }
        })
        .to_owned()
}

fn is_tile(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(DATASET_EXTENSION)
}
