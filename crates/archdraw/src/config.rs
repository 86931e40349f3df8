//! Configuration types for archdraw rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to the values that
//! reproduce the documentation image.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and palette settings.
//! - [`RenderConfig`] - Output resolution, background, trim padding and font.
//! - [`PaletteConfig`] - Per-category color overrides on top of the built-in palette.
//!
//! # Example
//!
//! ```
//! # use archdraw::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().dpi(), 300.0);
//! assert!(config.render().background_color().is_ok());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use archdraw_core::{
    color::Color, draw::DEFAULT_FONT_FAMILY, error::PaletteError, palette::Palette,
};

/// Resolution of the exported PNG.
pub const DEFAULT_DPI: f32 = 300.0;

/// Padding around the content bounds, in points (0.1 inch).
pub const DEFAULT_TRIM_PADDING: f32 = 7.2;

/// Background behind the rasterized diagram.
pub const DEFAULT_BACKGROUND_COLOR: &str = "white";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Palette override section.
    #[serde(default)]
    palette: PaletteConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, palette: PaletteConfig) -> Self {
        Self { render, palette }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the palette configuration.
    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    /// Returns a copy with the DPI replaced, used for command-line overrides.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.render.dpi = dpi;
        self
    }
}

/// Output settings for SVG and PNG export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Raster resolution in dots per inch.
    dpi: f32,

    /// Background color as a CSS color string.
    background_color: Option<String>,

    /// Padding around the union of element bounds, in points.
    trim_padding: f32,

    /// Font family for all text; system default sans when unset.
    font_family: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            background_color: None,
            trim_padding: DEFAULT_TRIM_PADDING,
            font_family: None,
        }
    }
}

impl RenderConfig {
    pub fn new(dpi: f32, trim_padding: f32) -> Self {
        Self {
            dpi,
            trim_padding,
            ..Self::default()
        }
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn trim_padding(&self) -> f32 {
        self.trim_padding
    }

    /// Returns the font family, falling back to [`DEFAULT_FONT_FAMILY`].
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    /// Returns the parsed background [`Color`], white when none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Color, String> {
        let css = self
            .background_color
            .as_deref()
            .unwrap_or(DEFAULT_BACKGROUND_COLOR);
        Color::new(css).map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Checks that the numeric settings are usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(format!("dpi must be a positive number, got {}", self.dpi));
        }
        if !self.trim_padding.is_finite() || self.trim_padding < 0.0 {
            return Err(format!(
                "trim_padding must be a non-negative number, got {}",
                self.trim_padding
            ));
        }
        self.background_color()?;
        Ok(())
    }
}

/// Color overrides keyed by palette category.
///
/// Deserializes from a flat table:
///
/// ```toml
/// [palette]
/// worker = "#FFE0B2"
/// edge = "black"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PaletteConfig {
    overrides: IndexMap<String, String>,
}

impl PaletteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, category: impl Into<String>, css: impl Into<String>) -> Self {
        self.overrides.insert(category.into(), css.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Applies the overrides to `palette`.
    ///
    /// Only categories the palette already defines can be overridden, so a
    /// misspelled category is reported instead of silently ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::UnknownCategory`] for a category missing from
    /// `palette` and [`PaletteError::InvalidColor`] for an unparsable color.
    pub fn apply(&self, palette: Palette) -> Result<Palette, PaletteError> {
        self.overrides
            .iter()
            .try_fold(palette, |palette, (category, css)| {
                if !palette.contains(category) {
                    return Err(PaletteError::UnknownCategory(category.clone()));
                }
                palette.with_override(category, css)
            })
    }
}
