//! pagediff CLI
//!
//! Compares two page images and prints the changed regions as JSON.

use clap::Parser;
use pagediff::{AnnotationFormat, CompareOptions, DiffError, DiffOptions, compare_encoded};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pagediff")]
#[command(about = "Find and box the regions that differ between two page images", long_about = None)]
struct Cli {
    /// Page before the revision (PNG or JPEG)
    old: PathBuf,

    /// Page after the revision (PNG or JPEG)
    new: PathBuf,

    /// Directory for the annotated pages and the mask
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Cell edge length in pixels
    #[arg(long, default_value_t = pagediff::diff::options::DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// RGB distance a pixel must exceed to count as different
    #[arg(long, default_value_t = pagediff::diff::options::DEFAULT_PIXEL_THRESHOLD)]
    pixel_threshold: u32,

    /// Differing pixels a cell must exceed to count as changed
    #[arg(long, default_value_t = pagediff::diff::options::DEFAULT_CELL_CHANGED_THRESHOLD)]
    cell_threshold: u32,

    /// Skip the diff mask
    #[arg(long)]
    no_mask: bool,

    /// Skip the annotated pages
    #[arg(long)]
    no_annotations: bool,

    /// Write annotated pages as PNG instead of JPEG
    #[arg(long)]
    png_annotations: bool,

    /// JPEG quality for annotated pages (1-100)
    #[arg(long, default_value_t = pagediff::io::DEFAULT_JPEG_QUALITY)]
    jpeg_quality: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error("failed to serialize regions: {0}")]
    Json(#[from] serde_json::Error),
}

impl Cli {
    fn options(&self) -> CompareOptions {
        let diff = DiffOptions::default()
            .with_cell_size(self.cell_size)
            .with_pixel_threshold(self.pixel_threshold)
            .with_cell_changed_threshold(self.cell_threshold);
        let format = if self.png_annotations {
            AnnotationFormat::Png
        } else {
            AnnotationFormat::Jpeg {
                quality: self.jpeg_quality,
            }
        };
        CompareOptions::default()
            .with_diff(diff)
            .with_mask(!self.no_mask)
            .with_annotations(!self.no_annotations)
            .with_annotation_format(format)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(dir: &Path, name: &str, data: &[u8]) -> Result<(), CliError> {
    let path = dir.join(name);
    fs::write(&path, data).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), bytes = data.len(), "wrote output");
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let options = cli.options();
    let old = read(&cli.old)?;
    let new = read(&cli.new)?;

    let result = compare_encoded(&old, &new, &options)?;
    info!(
        regions = result.regions.len(),
        changed_cells = result.changed_cells,
        "comparison finished"
    );

    println!("{}", serde_json::to_string_pretty(&result.regions)?);

    if let Some(dir) = &cli.out_dir {
        fs::create_dir_all(dir).map_err(|source| CliError::Write {
            path: dir.clone(),
            source,
        })?;
        let ext = options.annotation_format.image_format().extension();
        if let Some(bytes) = &result.annotated_old {
            write(dir, &format!("old_annotated.{}", ext), bytes)?;
        }
        if let Some(bytes) = &result.annotated_new {
            write(dir, &format!("new_annotated.{}", ext), bytes)?;
        }
        if let Some(bytes) = &result.mask_image {
            write(dir, "mask.png", bytes)?;
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pagediff=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library() {
        let cli = Cli::parse_from(["pagediff", "a.png", "b.png"]);
        assert_eq!(cli.options(), CompareOptions::default());
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = Cli::parse_from([
            "pagediff",
            "a.png",
            "b.png",
            "--cell-size",
            "10",
            "--cell-threshold",
            "2",
            "--no-mask",
            "--png-annotations",
        ]);
        let opts = cli.options();
        assert_eq!(opts.diff.cell_size, 10);
        assert_eq!(opts.diff.cell_changed_threshold, 2);
        assert_eq!(opts.diff.pixel_threshold, 100);
        assert!(!opts.with_mask);
        assert!(opts.with_annotations);
        assert_eq!(opts.annotation_format, AnnotationFormat::Png);
    }
}
