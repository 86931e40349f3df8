//! Stroke and line-style definitions.
//!
//! - [`StrokeDefinition`]: color, width and dash style of a line
//! - [`StrokeStyle`]: solid, dashed or dotted
//! - [`apply_stroke!`](crate::apply_stroke!): applies a definition to an SVG element
//!
//! Widths are in output points. Dash patterns are expressed in multiples of
//! the line width, so a thicker dashed border gets proportionally longer
//! dashes.
//!
//! ```
//! use archdraw_core::color::Color;
//! use archdraw_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::dashed(Color::new("#B0BEC5").unwrap(), 1.0);
//! let rect = svg_element::Rectangle::new().set("width", 10).set("height", 10);
//! let rect = archdraw_core::apply_stroke!(rect, &stroke);
//! assert!(rect.to_string().contains("stroke-dasharray"));
//! ```
//!
//! | Property | SVG attribute |
//! |----------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` |

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    /// Continuous line
    #[default]
    Solid,
    /// 3.7 on, 1.6 off
    Dashed,
    /// 1 on, 1.65 off
    Dotted,
}

impl StrokeStyle {
    /// Dash pattern in multiples of the line width, or `None` for solid.
    fn pattern(self) -> Option<&'static [f32]> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some(&[3.7, 1.6]),
            Self::Dotted => Some(&[1.0, 1.65]),
        }
    }

    /// Returns the SVG dasharray for a line of the given width, or `None` for
    /// solid lines.
    pub fn to_svg_value(self, width: f32) -> Option<String> {
        let pattern = self.pattern()?;
        let scaled: Vec<String> = pattern
            .iter()
            .map(|len| format_length(len * width))
            .collect();
        Some(scaled.join(","))
    }
}

fn format_length(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

/// A stroke for borders and connectors.
///
/// # Examples
///
/// ```
/// use archdraw_core::color::Color;
/// use archdraw_core::draw::{StrokeDefinition, StrokeStyle};
///
/// let border = StrokeDefinition::solid(Color::new("#455A64").unwrap(), 1.5);
/// assert_eq!(border.width(), 1.5);
///
/// let frame = StrokeDefinition::dotted(Color::new("#455A64").unwrap(), 1.0);
/// assert_eq!(frame.style(), StrokeStyle::Dotted);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dashed)
    }

    pub fn dotted(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dotted)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// The SVG dasharray for this stroke, `None` when solid
    pub fn dasharray(&self) -> Option<String> {
        self.style.to_svg_value(self.width)
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width and, unless the stroke is solid, the dash
/// pattern.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
