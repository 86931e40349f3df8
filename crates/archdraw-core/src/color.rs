//! Color handling for archdraw diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are parsed from CSS strings and written into
//! SVG as `#rrggbb` with a separate opacity value.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#E3F2FD"`,
    /// `"rgb(255, 0, 0)"` or `"white"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use archdraw_core::color::Color;
    ///
    /// let user = Color::new("#E3F2FD").unwrap();
    /// assert_eq!(user.to_string(), "#e3f2fd");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns a string that is safe to embed in an SVG `id` attribute.
    ///
    /// Used to name arrowhead markers per stroke color.
    pub fn to_id_safe_string(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("c{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    /// Returns the alpha component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as 8-bit sRGB components `[r, g, b, a]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

/// Formats the opaque part of the color as `#rrggbb`.
///
/// Opacity is carried separately through [`Color::alpha`] so that SVG
/// consumers receive `fill`/`fill-opacity` pairs.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.to_rgba8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("#E3F2FD").is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
        assert!(invalid.unwrap_err().contains("not-a-color"));
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "#000000");
        assert_eq!(color.to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_color_display_is_lowercase_hex() {
        let color = Color::new("#455A64").unwrap();
        assert_eq!(color.to_string(), "#455a64");

        let named = Color::new("white").unwrap();
        assert_eq!(named.to_string(), "#ffffff");
    }

    #[test]
    fn test_color_alpha_from_css() {
        let color = Color::new("rgba(255, 0, 0, 0.5)").unwrap();
        assert!((color.alpha() - 0.5).abs() < 0.001);
        // Display ignores alpha
        assert_eq!(color.to_string(), "#ff0000");
    }

    #[test]
    fn test_color_to_id_safe_string() {
        let color = Color::new("#ff8000").unwrap();
        let safe_id = color.to_id_safe_string();
        assert_eq!(safe_id, "cff8000ff");
        assert!(safe_id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_color_eq() {
        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("#FF0000").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1.to_rgba8(), color2.to_rgba8());
        assert_ne!(color1, color3);
    }
}
