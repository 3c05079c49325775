//! # Drape CLI
//!
//! Developer harness for the placement and compositing engine.
//!
//! ## Usage
//!
//! ```bash
//! # Render a mockup
//! drape compose --mockup tee-front.png --design logo.png --output mockup.png
//!
//! # Render from an editor request (JSON ComposeRequest)
//! drape compose --request request.json --output mockup.jpg
//!
//! # Raw mockup pixel box and outline for a placeholder
//! drape print-area placeholder.json --mockup-width 2000 --mockup-height 2400
//!
//! # Recompute a polygon placeholder's render polygon
//! drape refine placeholder.json --smoothness 60 --round-corners 30
//! ```

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use drape::{
    ComposeRequest, Compositor, DrapeError,
    config::OutputFormat,
    geometry::{self, PhysicalDimensions, Placeholder, Point, PrintAreaPixels},
    render::Tint,
};

/// Drape - print-area placement and mockup compositing
#[derive(Parser, Debug)]
#[command(name = "drape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Composite a design onto a garment mockup
    Compose {
        /// JSON compose request (flags below override its fields)
        #[arg(long, value_name = "FILE")]
        request: Option<PathBuf>,

        /// Garment mockup image URL or path
        #[arg(long)]
        mockup: Option<String>,

        /// Design image URL or path
        #[arg(long)]
        design: Option<String>,

        /// Output file (format from extension unless --format is given)
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,

        /// Output format: png or jpeg
        #[arg(long)]
        format: Option<String>,

        /// Output width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Output height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// JPEG quality (0-1)
        #[arg(long)]
        quality: Option<f32>,

        /// Garment tint as #rrggbb
        #[arg(long)]
        tint: Option<String>,

        /// Disable the fabric displacement effect
        #[arg(long)]
        flat: bool,
    },

    /// Print a placeholder's print area in raw mockup pixels
    PrintArea {
        /// Placeholder JSON file
        placeholder: PathBuf,

        /// Mockup image width in pixels
        #[arg(long)]
        mockup_width: f64,

        /// Mockup image height in pixels
        #[arg(long)]
        mockup_height: f64,

        /// Garment physical width in inches
        #[arg(long)]
        physical_width: Option<f64>,

        /// Garment physical height in inches
        #[arg(long)]
        physical_height: Option<f64>,
    },

    /// Recompute a polygon placeholder's render polygon
    Refine {
        /// Placeholder JSON file
        placeholder: PathBuf,

        /// Smoothness (0-100)
        #[arg(long)]
        smoothness: Option<f64>,

        /// Bulge strength (0-100)
        #[arg(long)]
        bulge: Option<f64>,

        /// Corner rounding (0-100)
        #[arg(long)]
        round_corners: Option<f64>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrintAreaReport {
    print_area: PrintAreaPixels,
    outline: Vec<Point>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DrapeError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compose {
            request,
            mockup,
            design,
            output,
            format,
            width,
            height,
            quality,
            tint,
            flat,
        } => {
            let mut req = match request {
                Some(path) => read_json::<ComposeRequest>(&path)?,
                None => ComposeRequest::default(),
            };
            if let Some(mockup) = mockup {
                req.mockup_url = mockup;
            }
            if let Some(design) = design {
                req.design_url = design;
            }
            if req.mockup_url.is_empty() || req.design_url.is_empty() {
                return Err(DrapeError::InvalidSettings(
                    "both a mockup and a design are required".to_string(),
                ));
            }

            let format = format.or_else(|| {
                output
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(str::to_string)
            });
            if let Some(name) = format {
                req.output.format = OutputFormat::parse(&name).ok_or_else(|| {
                    DrapeError::InvalidSettings(format!("Unknown output format '{}'", name))
                })?;
            }
            if let Some(width) = width {
                req.output.width = width;
            }
            if let Some(height) = height {
                req.output.height = height;
            }
            if let Some(quality) = quality {
                req.output.quality = quality;
            }
            if let Some(hex) = tint {
                req.tint = Some(Tint::from_hex(&hex).ok_or_else(|| {
                    DrapeError::InvalidSettings(format!("Invalid tint color '{}'", hex))
                })?);
            }
            if flat {
                req.displacement.enabled = false;
            }

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let compositor = Compositor::with_url_loader()?;
            let mockup = runtime.block_on(compositor.compose(&req))?;

            std::fs::write(&output, &mockup.bytes)?;
            println!(
                "Saved {}x{} mockup to {}",
                mockup.width,
                mockup.height,
                output.display()
            );
        }

        Commands::PrintArea {
            placeholder,
            mockup_width,
            mockup_height,
            physical_width,
            physical_height,
        } => {
            let placeholder = read_json::<Placeholder>(&placeholder)?;
            let defaults = PhysicalDimensions::default();
            let physical = PhysicalDimensions {
                width: physical_width.unwrap_or(defaults.width),
                height: physical_height.unwrap_or(defaults.height),
                ..defaults
            };

            let report = PrintAreaReport {
                print_area: geometry::placeholder_to_mockup_pixels(
                    &placeholder,
                    mockup_width,
                    mockup_height,
                    Some(&physical),
                ),
                outline: geometry::polygon_to_mockup_pixels(
                    &placeholder,
                    mockup_width,
                    mockup_height,
                    Some(&physical),
                ),
            };
            print_json(&report)?;
        }

        Commands::Refine {
            placeholder,
            smoothness,
            bulge,
            round_corners,
        } => {
            let mut placeholder = read_json::<Placeholder>(&placeholder)?;
            let mut params = placeholder.refinement;
            if let Some(v) = smoothness {
                params.smoothness = v;
            }
            if let Some(v) = bulge {
                params.bulge_strength = v;
            }
            if let Some(v) = round_corners {
                params.round_corners = v;
            }
            placeholder.set_refinement(params);
            if !placeholder.is_valid_polygon() {
                log::warn!(
                    "Placeholder '{}' is not a polygon with 3+ points; no render polygon",
                    placeholder.id
                );
            }
            print_json(&placeholder)?;
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DrapeError> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        DrapeError::InvalidSettings(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DrapeError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| DrapeError::InvalidSettings(format!("Cannot serialize output: {}", e)))?;
    println!("{}", text);
    Ok(())
}
