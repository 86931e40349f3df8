//! Command-line argument definitions for the archdraw CLI.
//!
//! Every argument is optional: running the binary without any reproduces
//! `docs/images/architecture.png` at 300 DPI.

use clap::Parser;

/// Where the PNG is written unless `--output` says otherwise.
pub const DEFAULT_OUTPUT: &str = "docs/images/architecture.png";

/// Command-line arguments for the archdraw renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output PNG file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Raster resolution, overriding the configuration file
    #[arg(long)]
    pub dpi: Option<f32>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also write the SVG document to this path
    #[arg(long)]
    pub svg: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            dpi: None,
            config: None,
            svg: None,
            log_level: "info".to_string(),
        }
    }
}
