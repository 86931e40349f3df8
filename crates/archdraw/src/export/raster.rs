//! PNG rasterization of rendered SVG documents.
//!
//! The SVG is parsed with `usvg` using the system font database, painted by
//! `resvg` onto a `tiny-skia` pixmap pre-filled with the background color, and
//! encoded as PNG. One SVG point maps to `dpi / 72` pixels.

use std::{fs, path::Path};

use log::{debug, info};

use archdraw_core::{canvas::POINTS_PER_INCH, color::Color, scene::Scene};

use super::{
    Error, Exporter, ensure_parent_dir,
    svg::{RenderedDiagram, Svg},
};
use crate::config::DEFAULT_DPI;

/// PNG exporter wrapping an [`Svg`] renderer.
#[derive(Debug, Clone)]
pub struct Png {
    svg: Svg,
    dpi: f32,
}

impl Png {
    pub fn new(svg: Svg) -> Self {
        Self {
            svg,
            dpi: DEFAULT_DPI,
        }
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Pixels per SVG point
    pub fn scale(&self) -> f32 {
        self.dpi / POINTS_PER_INCH
    }

    /// Renders `scene` and rasterizes it into a pixmap.
    pub fn render_pixmap(&self, scene: &Scene) -> Result<tiny_skia::Pixmap, Error> {
        let rendered = self.svg.render_scene(scene);
        self.rasterize(&rendered)
    }

    /// Renders `scene` to PNG bytes.
    pub fn render_png(&self, scene: &Scene) -> Result<Vec<u8>, Error> {
        let pixmap = self.render_pixmap(scene)?;
        pixmap
            .encode_png()
            .map_err(|err| Error::PngEncode(err.to_string()))
    }

    /// Rasterizes an already rendered document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SvgParse`] if `usvg` rejects the document and
    /// [`Error::PixmapAlloc`] if the pixmap cannot be allocated.
    pub fn rasterize(&self, rendered: &RenderedDiagram) -> Result<tiny_skia::Pixmap, Error> {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        options.font_family = self.svg.font_family().to_string();

        let tree = usvg::Tree::from_str(rendered.svg(), &options)
            .map_err(|err| Error::SvgParse(err.to_string()))?;

        let (width, height) = rendered.pixel_size(self.dpi);
        debug!(width = width, height = height, dpi = self.dpi; "Allocating pixmap");
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(Error::PixmapAlloc { width, height })?;

        if let Some(background) = self.svg.background() {
            pixmap.fill(to_skia_color(background));
        }

        let scale = self.scale();
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        Ok(pixmap)
    }
}

impl Exporter for Png {
    fn export_scene(&self, scene: &Scene, path: &Path) -> Result<(), Error> {
        ensure_parent_dir(path)?;
        let png = self.render_png(scene)?;
        info!(path:? = path, bytes = png.len(), dpi = self.dpi; "Writing PNG file");
        fs::write(path, png)?;
        Ok(())
    }
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}
