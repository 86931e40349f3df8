//! Error types for archdraw operations.
//!
//! [`ArchdrawError`] wraps every failure the pipeline can hit, from an invalid
//! scene through configuration mistakes to export failures.

use std::io;

use thiserror::Error;

use archdraw_core::error::{GeometryError, PaletteError};

/// The main error type for archdraw operations.
#[derive(Debug, Error)]
pub enum ArchdrawError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}
