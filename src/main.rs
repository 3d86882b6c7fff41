use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::info;
use noteink::Config;
use noteink::config::SnapshotBackground;
use noteink::draw::render_snapshot;
use noteink::storage::{StorageOptions, inspect_drawing, load_drawing};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "noteink")]
#[command(version, about = "Render and inspect note ink drawings")]
struct Cli {
    /// Read settings from this file instead of ~/.config/noteink/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a saved drawing to a PNG thumbnail
    Thumbnail {
        /// Drawing file (plain or gzip-compressed JSON)
        file: PathBuf,

        /// Output image (defaults to FILE with a .png extension)
        #[arg(long, short = 'o', value_name = "OUT")]
        output: Option<PathBuf>,

        /// Image width in pixels
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=4096))]
        width: Option<i32>,

        /// Image height in pixels
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=4096))]
        height: Option<i32>,

        /// Scale the strokes to fill the image
        #[arg(long, action = ArgAction::SetTrue)]
        fit: bool,

        /// Background behind the strokes
        #[arg(long, value_enum)]
        background: Option<BackgroundArg>,
    },

    /// Print stroke and point counts for a saved drawing
    Info {
        /// Drawing file (plain or gzip-compressed JSON)
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BackgroundArg {
    Transparent,
    White,
}

impl From<BackgroundArg> for SnapshotBackground {
    fn from(value: BackgroundArg) -> Self {
        match value {
            BackgroundArg::Transparent => SnapshotBackground::Transparent,
            BackgroundArg::White => SnapshotBackground::White,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Thumbnail {
            file,
            output,
            width,
            height,
            fit,
            background,
        } => {
            let mut snapshot = config.snapshot.clone();
            if let Some(width) = width {
                snapshot.width = width;
            }
            if let Some(height) = height {
                snapshot.height = height;
            }
            if fit {
                snapshot.fit_to_content = true;
            }
            if let Some(background) = background {
                snapshot.background = background.into();
            }

            let output = output.unwrap_or_else(|| file.with_extension("png"));
            run_thumbnail(&config, &file, &output, &snapshot.to_options())
        }
        Command::Info { file } => run_info(&config, &file),
    }
}

fn run_thumbnail(
    config: &Config,
    file: &Path,
    output: &Path,
    options: &noteink::draw::SnapshotOptions,
) -> Result<()> {
    let storage = StorageOptions::from_config(&config.storage);
    let drawing = load_drawing(file, &storage)?
        .with_context(|| format!("No drawing found at {}", file.display()))?;

    let image = render_snapshot(&drawing.strokes, options)
        .with_context(|| format!("Failed to render {}", file.display()))?;
    image
        .write_png(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Rendered {} strokes from {}",
        drawing.strokes.len(),
        file.display()
    );
    println!(
        "Wrote {}x{} thumbnail to {}",
        image.width(),
        image.height(),
        output.display()
    );
    Ok(())
}

fn run_info(config: &Config, file: &Path) -> Result<()> {
    let storage = StorageOptions::from_config(&config.storage);
    let inspection = inspect_drawing(file, &storage)?
        .with_context(|| format!("No drawing found at {}", file.display()))?;

    println!("Drawing: {}", inspection.path.display());
    println!(
        "Size: {} bytes{}",
        inspection.size_bytes,
        if inspection.compressed { " (gzip)" } else { "" }
    );
    println!("Strokes: {}", inspection.stroke_count);
    println!("Points: {}", inspection.point_count);
    match inspection.bounds {
        Some(bounds) => println!(
            "Bounds: ({:.1}, {:.1}) - ({:.1}, {:.1})",
            bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
        ),
        None => println!("Bounds: empty"),
    }
    println!(
        "Tool state: {}",
        if inspection.tool_state_present {
            "saved"
        } else {
            "not saved"
        }
    );
    println!(
        "Backup: {}",
        if inspection.backup_exists {
            "present"
        } else {
            "none"
        }
    );
    Ok(())
}
