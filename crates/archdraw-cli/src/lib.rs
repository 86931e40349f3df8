//! CLI logic for the archdraw renderer.
//!
//! Loads configuration, composes the architecture diagram and writes it as a
//! PNG, optionally alongside its SVG source.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, DEFAULT_OUTPUT};
pub use config::{ConfigError, load_config, parse_config};

use log::info;

use archdraw::{ArchdrawError, DiagramBuilder};

/// Run the archdraw CLI application
///
/// # Errors
///
/// Returns `ArchdrawError` for:
/// - Configuration loading errors
/// - Palette or geometry errors in the composed scene
/// - Export errors, including a missing output directory
pub fn run(args: &Args) -> Result<(), ArchdrawError> {
    info!(
        output_path = args.output,
        svg_path:? = args.svg;
        "Rendering architecture diagram"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(dpi) = args.dpi {
        app_config = app_config.with_dpi(dpi);
    }

    let builder = DiagramBuilder::new(app_config);
    let scene = builder.compose()?;

    if let Some(svg_path) = &args.svg {
        builder.export_svg(&scene, svg_path)?;
        info!(output_file = svg_path; "SVG exported successfully");
    }

    builder.export_png(&scene, &args.output)?;
    info!(output_file = args.output; "PNG exported successfully");

    Ok(())
}
