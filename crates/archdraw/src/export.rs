//! Export of composed scenes to files.
//!
//! The export stage is the last step of the pipeline:
//!
//! ```text
//! Palette
//!     ↓ compose
//! Scene (validated draw commands)
//!     ↓ render (svg)
//! SVG document
//!     ↓ rasterize (raster)
//! PNG file
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - trimmed, layered SVG documents via [`svg::Svg`]
//! - [`raster`] - PNG files rasterized from that SVG via [`raster::Png`]
//!
//! Export operations return [`Error`], which converts into
//! [`ArchdrawError::Export`](crate::ArchdrawError::Export) at the crate boundary.

pub mod raster;
pub mod svg;

use std::{
    io,
    path::{Path, PathBuf},
};

use log::error;
use thiserror::Error;

use archdraw_core::scene::Scene;

/// Abstraction over export backends.
pub trait Exporter {
    /// Renders `scene` and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDirectory`] when the directory of `path` does
    /// not exist, or a backend specific error when rendering or writing fails.
    fn export_scene(&self, scene: &Scene, path: &Path) -> Result<(), Error>;
}

/// Errors raised while exporting a scene.
#[derive(Debug, Error)]
pub enum Error {
    #[error("output directory `{}` does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("failed to parse rendered SVG: {0}")]
    SvgParse(String),

    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    PngEncode(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Fails with [`Error::MissingDirectory`] unless the directory that would
/// contain `path` exists.
///
/// A bare file name refers to the working directory, which always exists.
pub fn ensure_parent_dir(path: &Path) -> Result<(), Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            error!(path:? = path, directory:? = parent; "Output directory does not exist");
            Err(Error::MissingDirectory(parent.to_path_buf()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_parent_dir() {
        let dir = tempfile::tempdir().unwrap();

        assert!(ensure_parent_dir(&dir.path().join("out.png")).is_ok());
        assert!(ensure_parent_dir(Path::new("out.png")).is_ok());

        let missing = dir.path().join("missing").join("out.png");
        match ensure_parent_dir(&missing) {
            Err(Error::MissingDirectory(parent)) => {
                assert_eq!(parent, dir.path().join("missing"));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
