//! mnistidx: random-access decoding of IDX digit datasets.
//!
//! IDX is the container format used to distribute handwritten-digit datasets
//! such as MNIST. A dataset ships as a pair of files, one of images and one
//! of labels, whose items correspond by index. This crate decodes either file
//! kind into typed [`Label`](idx::Label) and [`Image`](idx::Image) values, by
//! index or all at once, and maps stored pixel intensities to colors.
//!
//! # Modules
//!
//! - [`idx`]: Header validation, label and image decoders, color mapping
//! - [`inspect`]: File summaries and label distributions
//! - [`extract`]: Writing images out as PNG files
//! - [`error`]: Error types for mnistidx operations

pub mod error;
pub mod extract;
pub mod idx;
pub mod inspect;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

pub use error::MnistIdxError;

use extract::{ExtractOptions, NullLabels};
use idx::{ImageReader, LabelReader};
use inspect::InspectOptions;

/// The mnistidx CLI application.
#[derive(Parser)]
#[command(name = "mnistidx")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write images from an IDX image file as PNG files.
    Extract(ExtractArgs),
    /// Summarize an IDX label or image file.
    Inspect(InspectArgs),
}

/// Arguments for the extract subcommand.
#[derive(clap::Args)]
struct ExtractArgs {
    /// Image file.
    #[arg(short = 'i', long = "image")]
    image: PathBuf,

    /// Label file; images are labelled 0 without it.
    #[arg(short = 'l', long = "label")]
    label: Option<PathBuf>,

    /// Index to extract (default: all). May be repeated.
    #[arg(short = 'e', long = "extract")]
    extract: Vec<usize>,

    /// Extract only this many randomly chosen images.
    #[arg(long)]
    sample: Option<usize>,

    /// Seed for --sample.
    #[arg(long, requires = "sample")]
    seed: Option<u64>,

    /// Output directory.
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Input file to inspect.
    input: PathBuf,

    /// Record kind stored in the file.
    #[arg(long, value_enum)]
    kind: KindArg,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputArg::Text)]
    output: OutputArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Labels,
    Images,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Text,
    Json,
}

/// Run the mnistidx CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), MnistIdxError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Extract(args)) => run_extract(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("mnistidx {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Random-access decoder for IDX digit datasets.");
            println!();
            println!("Run 'mnistidx --help' for usage information.");
            Ok(())
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, MnistIdxError> {
    let file = File::open(path).map_err(MnistIdxError::Io)?;
    Ok(BufReader::new(file))
}

/// Execute the extract subcommand.
fn run_extract(args: ExtractArgs) -> Result<(), MnistIdxError> {
    let mut images = ImageReader::new(open(&args.image)?);
    images.validate_header()?;
    let (width, height) = images.dimensions();
    log::info!(
        "Image file holds {} image(s) of {}x{}",
        images.num_images(),
        width,
        height
    );

    let opts = ExtractOptions {
        indices: args.extract,
        sample: args.sample,
        seed: args.seed,
        out_dir: args.out,
    };

    let summary = match &args.label {
        Some(path) => {
            let mut labels = LabelReader::new(open(path)?);
            labels.validate_header()?;
            extract::check_paired_counts(&images, &labels)?;
            extract::extract_images(&mut images, &mut labels, &opts)?
        }
        None => extract::extract_images(&mut images, &mut NullLabels, &opts)?,
    };

    println!(
        "Extracted {} image(s) to {}",
        summary.written.len(),
        opts.out_dir.display()
    );
    if !summary.skipped.is_empty() {
        println!("Skipped {} index(es)", summary.skipped.len());
    }
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), MnistIdxError> {
    let source = open(&args.input)?;
    let opts = InspectOptions::default();

    let report = match args.kind {
        KindArg::Labels => inspect::inspect_labels(&mut LabelReader::new(source), &opts)?,
        KindArg::Images => inspect::inspect_images(&mut ImageReader::new(source), &opts)?,
    };

    match args.output {
        OutputArg::Json => {
            let json = report.to_json_string().map_err(std::io::Error::from)?;
            println!("{}", json);
        }
        OutputArg::Text => print!("{}", report),
    }
    Ok(())
}
