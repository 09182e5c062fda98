use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use inkpad::draw::SvgOptions;
use inkpad::pad::{FromDataOptions, ImageFormat};
use inkpad::stroke::PointGroup;
use inkpad::{Config, SignaturePad};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "inkpad")]
#[command(version, about = "Replay and export captured signature strokes")]
struct Cli {
    /// Config file to use instead of ~/.config/inkpad/config.toml
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay stroke data and export it as an image
    Render {
        /// JSON file holding exported point groups
        input: PathBuf,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = Format::Png)]
        format: Format,

        /// Write the image here instead of printing a data URL
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Paint the configured background behind SVG output
        #[arg(long, action = ArgAction::SetTrue)]
        background: bool,

        /// Surface width in logical units
        #[arg(long)]
        width: Option<f64>,

        /// Surface height in logical units
        #[arg(long)]
        height: Option<f64>,

        /// Device pixel ratio
        #[arg(long)]
        ratio: Option<f64>,
    },
    /// Print a summary of stroke data
    Info {
        /// JSON file holding exported point groups
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Png,
    Svg,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            input,
            format,
            output,
            background,
            width,
            height,
            ratio,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(width) = width {
                config.surface.width = width;
            }
            if let Some(height) = height {
                config.surface.height = height;
            }
            if let Some(ratio) = ratio {
                config.surface.device_pixel_ratio = ratio;
            }
            config.validate_and_clamp();

            let json = read_input(&input)?;
            let mut pad = SignaturePad::new(config.surface_size(), config.pad_options())
                .context("Failed to allocate drawing surface")?;
            pad.from_json(&json, FromDataOptions::default())
                .with_context(|| format!("Failed to load strokes from {}", input.display()))?;
            log::info!(
                "Replayed {} point groups from {}",
                pad.to_data().len(),
                input.display()
            );

            let svg_options = SvgOptions {
                include_background_color: background,
            };
            match output {
                Some(path) => {
                    let bytes = match format {
                        Format::Png => pad
                            .surface()
                            .encode_png()
                            .context("Failed to encode PNG")?,
                        Format::Svg => pad.to_svg(svg_options).into_bytes(),
                    };
                    fs::write(&path, bytes)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote {}", path.display());
                }
                None => {
                    let format = match format {
                        Format::Png => ImageFormat::Png,
                        Format::Svg => ImageFormat::Svg(svg_options),
                    };
                    println!("{}", pad.to_data_url(format)?);
                }
            }
        }
        Command::Info { input } => {
            let json = read_input(&input)?;
            let groups: Vec<PointGroup> = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse strokes from {}", input.display()))?;
            let points: usize = groups.iter().map(|group| group.points.len()).sum();
            println!("groups: {}", groups.len());
            println!("points: {points}");
            for (index, group) in groups.iter().enumerate() {
                println!(
                    "  #{index}: {} points, color {}, width {}-{}",
                    group.points.len(),
                    group.style.color,
                    group.style.min_width,
                    group.style.max_width
                );
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
