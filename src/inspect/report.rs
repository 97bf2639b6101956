//! Inspect report types and terminal formatting.

use std::fmt;

use serde::Serialize;

use crate::idx::{Label, RecordKind};

/// Inner width of the report boxes, in characters.
const BOX_WIDTH: usize = 59;

/// The result of inspecting an IDX file.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Header-derived summary.
    pub summary: SummarySection,
    /// Label distribution; only present for label files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelsSection>,
    /// Display options for formatting.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// Header-derived summary.
#[derive(Clone, Debug, Serialize)]
pub struct SummarySection {
    pub kind: RecordKind,
    /// Item count declared in the header.
    pub items: usize,
    /// Column count, for image files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Row count, for image files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Expected payload size after the header.
    pub payload_bytes: u64,
}

/// Label distribution section.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LabelsSection {
    /// Number of distinct label values present.
    pub distinct: usize,
    /// Total labels counted.
    pub total: usize,
    /// One entry per present label value, ascending.
    pub entries: Vec<LabelCount>,
}

/// A single label value with its count.
#[derive(Clone, Debug, Serialize)]
pub struct LabelCount {
    pub label: Label,
    pub count: usize,
}

impl InspectReport {
    /// Renders the report as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        self.fmt_summary(f)?;

        if let Some(labels) = &self.labels {
            writeln!(f)?;
            self.fmt_labels(f, labels)?;
        }

        Ok(())
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        box_top(f, "Summary")?;
        box_row(f, "")?;
        box_row(f, &format!("Kind:          {}", s.kind))?;
        box_row(f, &format!("Items:         {}", group_digits(s.items as u64)))?;
        if let (Some(w), Some(h)) = (s.width, s.height) {
            box_row(f, &format!("Dimensions:    {} x {}", w, h))?;
        }
        box_row(
            f,
            &format!("Payload:       {} bytes", group_digits(s.payload_bytes)),
        )?;
        box_row(f, "")?;
        box_bottom(f)
    }

    fn fmt_labels(&self, f: &mut fmt::Formatter<'_>, l: &LabelsSection) -> fmt::Result {
        box_top(f, &format!("Labels ({})", l.distinct))?;
        box_row(f, "")?;

        if l.entries.is_empty() {
            box_row(f, "No labels found.")?;
        } else {
            let max_count = l.entries.iter().map(|e| e.count).max().unwrap_or(1);

            for entry in &l.entries {
                let bar = histogram_bar(entry.count, max_count, self.bar_width);
                box_row(
                    f,
                    &format!(
                        "{:<5} {:>9} {:>6}  {}",
                        entry.label,
                        group_digits(entry.count as u64),
                        share(entry.count, l.total),
                        bar
                    ),
                )?;
            }
        }

        box_row(f, "")?;
        box_bottom(f)
    }
}

fn box_top(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let used = title.chars().count() + 3;
    writeln!(
        f,
        "┌─ {} {}┐",
        title,
        "─".repeat(BOX_WIDTH.saturating_sub(used))
    )
}

fn box_row(f: &mut fmt::Formatter<'_>, content: &str) -> fmt::Result {
    let padding = BOX_WIDTH.saturating_sub(content.chars().count() + 3);
    writeln!(f, "│   {}{}│", content, " ".repeat(padding))
}

fn box_bottom(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "└{}┘", "─".repeat(BOX_WIDTH))
}

/// Partial cells for the last column of a histogram bar, in eighths.
const EIGHTHS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Groups the digits of `n` in threes: `60000` becomes `60,000`.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.char_indices() {
        if i != 0 && (i + 3 - head) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `part / whole` as a percentage rounded to one decimal, `-` for an empty file.
fn share(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "-".to_string();
    }
    let (part, whole) = (part as u64, whole as u64);
    let permille = (part * 1000 + whole / 2) / whole;
    format!("{}.{}%", permille / 10, permille % 10)
}

/// Bar of `count` relative to `max_count`, `width` cells long at most,
/// drawn with eighth-cell resolution.
fn histogram_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let eighths = count.min(max_count) * width * 8 / max_count;
    let mut bar = "█".repeat(eighths / 8);
    if eighths % 8 != 0 {
        bar.push(EIGHTHS[eighths % 8]);
    }
    bar
}
