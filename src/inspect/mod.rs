//! Dataset inspection.
//!
//! Produces a summary of an IDX file (record kind, item count, image
//! dimensions) and, for label files, the distribution of label values.

mod report;

pub use report::{InspectReport, LabelCount, LabelsSection, SummarySection};

use std::io::{Read, Seek};

use crate::error::MnistIdxError;
use crate::idx::{ImageReader, Label, LabelReader, RecordKind};

/// Options for dataset inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { bar_width: 20 }
    }
}

/// Inspect a label file.
///
/// Every label is read, so a truncated payload is reported as an error.
pub fn inspect_labels<R: Read + Seek>(
    reader: &mut LabelReader<R>,
    opts: &InspectOptions,
) -> Result<InspectReport, MnistIdxError> {
    let labels = reader.decode_all()?;

    let mut counts = [0usize; 256];
    for label in &labels {
        counts[label.as_u8() as usize] += 1;
    }

    // Ascending label order; digits read naturally top to bottom
    let entries: Vec<LabelCount> = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(value, &count)| LabelCount {
            label: Label::new(value as u8),
            count,
        })
        .collect();

    Ok(InspectReport {
        summary: SummarySection {
            kind: RecordKind::Labels,
            items: labels.len(),
            width: None,
            height: None,
            payload_bytes: labels.len() as u64,
        },
        labels: Some(LabelsSection {
            distinct: entries.len(),
            total: labels.len(),
            entries,
        }),
        bar_width: opts.bar_width,
    })
}

/// Inspect an image file. Only the header is read.
pub fn inspect_images<R: Read + Seek>(
    reader: &mut ImageReader<R>,
    opts: &InspectOptions,
) -> Result<InspectReport, MnistIdxError> {
    reader.validate_header()?;

    let items = reader.num_images();
    let (width, height) = reader.dimensions();

    Ok(InspectReport {
        summary: SummarySection {
            kind: RecordKind::Images,
            items,
            width: Some(width),
            height: Some(height),
            payload_bytes: items as u64 * u64::from(width) * u64::from(height),
        },
        labels: None,
        bar_width: opts.bar_width,
    })
}
