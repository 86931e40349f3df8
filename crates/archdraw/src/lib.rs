//! Archdraw - renders the project's architecture diagram.
//!
//! Composition, SVG rendering and PNG export of a single, fixed architecture
//! diagram. The diagram is declared as an immutable scene of boxes, frames,
//! arrows and labels, then rendered to a document trimmed to its content.

pub mod architecture;
pub mod config;
pub mod export;

mod error;

pub use archdraw_core::{canvas, color, draw, geometry, palette, scene};

pub use error::ArchdrawError;
pub use export::svg::RenderedDiagram;

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use export::{
    Exporter,
    raster::Png,
    svg::{Svg, SvgBuilder},
};
use palette::Palette;
use scene::Scene;

/// Builder for composing and rendering the architecture diagram.
///
/// # Examples
///
/// ```rust,no_run
/// use archdraw::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Compose the scene
/// let scene = builder.compose().expect("Failed to compose");
///
/// // Render it to SVG
/// let rendered = builder.render_svg(&scene).expect("Failed to render");
/// println!("{}", rendered.svg());
///
/// // Or write the PNG
/// builder
///     .export_png(&scene, "docs/images/architecture.png")
///     .expect("Failed to export");
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Render settings and palette overrides
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The architecture palette with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ArchdrawError::Palette`] for an override naming an unknown
    /// category or carrying an unparsable color.
    pub fn palette(&self) -> Result<Palette, ArchdrawError> {
        let palette = self.config.palette().apply(Palette::architecture())?;
        trace!(palette:?; "Resolved palette");
        Ok(palette)
    }

    /// Compose the architecture diagram into a validated scene.
    ///
    /// # Errors
    ///
    /// Returns [`ArchdrawError`] for palette or geometry errors.
    pub fn compose(&self) -> Result<Scene, ArchdrawError> {
        let palette = self.palette()?;
        architecture::compose(&palette)
    }

    /// Render a scene to an SVG document trimmed to its content.
    ///
    /// # Errors
    ///
    /// Returns [`ArchdrawError::Config`] for invalid render settings.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use archdraw::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// let scene = builder.compose().expect("Failed to compose");
    /// let rendered = builder.render_svg(&scene).expect("Failed to render");
    /// assert!(rendered.svg().contains("<svg"));
    /// ```
    pub fn render_svg(&self, scene: &Scene) -> Result<RenderedDiagram, ArchdrawError> {
        info!(commands = scene.commands().len(); "Rendering SVG");
        let rendered = self.svg()?.render_scene(scene);
        debug!(width = rendered.width(), height = rendered.height(); "SVG rendered");
        Ok(rendered)
    }

    /// Write a scene as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`ArchdrawError::Export`] if the output directory is missing or
    /// the file cannot be written.
    pub fn export_svg(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<(), ArchdrawError> {
        let path = path.as_ref();
        self.svg()?.export_scene(scene, path)?;
        info!(path:? = path; "SVG exported");
        Ok(())
    }

    /// Rasterize a scene at the configured DPI and write it as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns [`ArchdrawError::Export`] if the output directory is missing,
    /// rasterization fails, or the file cannot be written.
    pub fn export_png(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<(), ArchdrawError> {
        let path = path.as_ref();
        let png = Png::new(self.svg()?).with_dpi(self.config.render().dpi());
        png.export_scene(scene, path)?;
        info!(path:? = path, dpi = png.dpi(); "PNG exported");
        Ok(())
    }

    /// Render a scene to PNG bytes without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ArchdrawError`] for invalid settings or rasterization failures.
    pub fn render_png(&self, scene: &Scene) -> Result<Vec<u8>, ArchdrawError> {
        let png = Png::new(self.svg()?).with_dpi(self.config.render().dpi());
        Ok(png.render_png(scene)?)
    }

    fn svg(&self) -> Result<Svg, ArchdrawError> {
        let render = self.config.render();
        render.validate().map_err(ArchdrawError::Config)?;
        let background = render.background_color().map_err(ArchdrawError::Config)?;
        Ok(SvgBuilder::new()
            .with_background(background)
            .with_font_family(render.font_family())
            .with_trim_padding(render.trim_padding())
            .build())
    }
}
