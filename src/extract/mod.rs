//! Image extraction.
//!
//! Pairs each image with its label and writes it as a PNG file named
//! `{index:06}_{label}.png`. Without a label file every image gets label `0`.

use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use image::ImageFormat;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::error::MnistIdxError;
use crate::idx::{Image, ImageReader, Label, LabelReader};

/// Something that yields the label for an image index.
pub trait LabelSource {
    fn label_for(&mut self, index: usize) -> Result<Label, MnistIdxError>;
}

impl<R: Read + Seek> LabelSource for LabelReader<R> {
    fn label_for(&mut self, index: usize) -> Result<Label, MnistIdxError> {
        self.read_label(index)
    }
}

/// Label source used when no label file is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLabels;

impl LabelSource for NullLabels {
    fn label_for(&mut self, _index: usize) -> Result<Label, MnistIdxError> {
        Ok(Label::default())
    }
}

/// Extraction options.
#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    /// Indices to extract; empty means all.
    pub indices: Vec<usize>,
    /// Keep only this many randomly chosen indices of the selection.
    pub sample: Option<usize>,
    pub seed: Option<u64>,
    /// Directory the PNG files are written to.
    pub out_dir: PathBuf,
}

/// Outcome of an extraction run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Files successfully written.
    pub written: Vec<PathBuf>,
    /// Indices skipped because they were out of range or failed to read/write.
    pub skipped: Vec<usize>,
}

/// Checks that a paired label file holds as many items as the image file.
///
/// Both readers must already be validated.
pub fn check_paired_counts<I, L>(
    images: &ImageReader<I>,
    labels: &LabelReader<L>,
) -> Result<(), MnistIdxError> {
    if images.num_images() != labels.num_labels() {
        return Err(MnistIdxError::CountMismatch {
            images: images.num_images(),
            labels: labels.num_labels(),
        });
    }
    Ok(())
}

/// Output file name for an image.
pub fn output_file_name(index: usize, label: Label) -> String {
    format!("{:06}_{}.png", index, label)
}

/// Resolves the requested indices against the item count.
///
/// An empty request selects everything. Out-of-range indices are dropped and
/// returned separately.
pub fn select_indices(num_images: usize, requested: &[usize]) -> (Vec<usize>, Vec<usize>) {
    if requested.is_empty() {
        return ((0..num_images).collect(), Vec::new());
    }
    requested
        .iter()
        .copied()
        .partition(|&index| index < num_images)
}

/// Picks `n` distinct indices uniformly at random, returned ascending.
pub fn sample_indices(
    mut indices: Vec<usize>,
    n: usize,
    seed: Option<u64>,
) -> Result<Vec<usize>, MnistIdxError> {
    if n == 0 {
        return Err(MnistIdxError::InvalidSampleParams {
            message: "--sample must be greater than 0".to_string(),
        });
    }

    if n >= indices.len() {
        return Ok(indices);
    }

    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    } else {
        let mut rng = rand::rng();
        indices.shuffle(&mut rng);
    }

    indices.truncate(n);
    indices.sort_unstable();
    Ok(indices)
}

/// Renders an image through the color mapping and writes it as PNG.
pub fn write_png(path: &Path, image: &Image) -> Result<(), MnistIdxError> {
    image
        .to_rgba16()
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| MnistIdxError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes the selected images as PNG files.
///
/// The image reader must already be validated. Images that fail to read or
/// write are logged and skipped; a label read failure aborts the run.
pub fn extract_images<R, L>(
    images: &mut ImageReader<R>,
    labels: &mut L,
    opts: &ExtractOptions,
) -> Result<ExtractSummary, MnistIdxError>
where
    R: Read + Seek,
    L: LabelSource + ?Sized,
{
    let num_images = images.num_images();
    let (mut selected, out_of_range) = select_indices(num_images, &opts.indices);
    for index in &out_of_range {
        log::warn!(
            "Index out of range: {} (must be 0 <= x < {})",
            index,
            num_images
        );
    }

    if let Some(n) = opts.sample {
        selected = sample_indices(selected, n, opts.seed)?;
    }

    fs::create_dir_all(&opts.out_dir)?;

    let mut summary = ExtractSummary {
        written: Vec::with_capacity(selected.len()),
        skipped: out_of_range,
    };

    for index in selected {
        let label = labels.label_for(index)?;

        let image = match images.read_image(index) {
            Ok(image) => image,
            Err(err) => {
                log::warn!("Could not read image #{}: {}. Skipping...", index, err);
                summary.skipped.push(index);
                continue;
            }
        };

        let path = opts.out_dir.join(output_file_name(index, label));
        match write_png(&path, &image) {
            Ok(()) => summary.written.push(path),
            Err(err) => {
                log::warn!("Could not save image #{}: {}", index, err);
                summary.skipped.push(index);
            }
        }
    }

    log::info!(
        "Wrote {} image(s) to '{}'",
        summary.written.len(),
        opts.out_dir.display()
    );
    Ok(summary)
}
