//! Text styling, measurement and rendering.
//!
//! - [`TextDefinition`] - Reusable text style (font, size, weight, color)
//! - [`Text`] - Content paired with a definition, measurable and renderable
//! - [`PlacedText`] - A [`Text`] placed at a logical point on the canvas
//!
//! Font sizes are in points, which is also the unit of the output space, so a
//! 10 pt label is 10 units tall in the SVG. Multi-line content is rendered
//! one `<tspan>` per line.

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    canvas::Canvas,
    color::Color,
    draw::{Drawable, LayeredOutput, ZOrder},
    geometry::{Bounds, Point, Size},
};

/// Font family used for measurement when a definition does not name one.
pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans";

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.2;

/// Average glyph advance as a multiple of the font size, used when no font
/// is available to measure with.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Font weight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }

    fn to_cosmic(self) -> Weight {
        match self {
            Self::Normal => Weight::NORMAL,
            Self::Bold => Weight::BOLD,
        }
    }
}

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor
    Start,
    /// Text is centered on the anchor
    #[default]
    Middle,
}

impl TextAnchor {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Vertical alignment of text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    /// The block of lines is centered on the anchor
    #[default]
    Center,
    /// The first line's baseline passes through the anchor
    Baseline,
}

/// Visual style of a piece of text.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | unset (inherited from the document) |
/// | Font size | 11 pt |
/// | Weight | bold |
/// | Color | black |
///
/// # Examples
///
/// ```
/// # use archdraw_core::color::Color;
/// # use archdraw_core::draw::{FontWeight, TextDefinition};
/// let subtext = TextDefinition::new()
///     .with_font_size(9.0)
///     .with_weight(FontWeight::Normal)
///     .with_color(Color::new("#5D4037").unwrap());
/// assert_eq!(subtext.font_size(), 9.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: Option<String>,
    font_size: f32,
    weight: FontWeight,
    color: Color,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Distance between consecutive baselines
    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_SPACING
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 11.0,
            weight: FontWeight::Bold,
            color: Color::default(),
        }
    }
}

/// Text content with a style, rendered around an output-space point.
///
/// ```
/// # use archdraw_core::draw::{Text, TextDefinition};
/// let style = TextDefinition::new();
/// let text = Text::new(&style, "Edge\nNetwork");
/// assert_eq!(text.lines().count(), 2);
/// assert!(text.calculate_size().height() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.content.lines()
    }

    /// Size of the rendered block in points.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    /// Output-space bounds of the text when rendered at `position`.
    pub fn bounds_at(&self, position: Point, anchor: TextAnchor, valign: VerticalAlign) -> Bounds {
        let size = self.calculate_size();
        let min_x = match anchor {
            TextAnchor::Start => position.x(),
            TextAnchor::Middle => position.x() - size.width() / 2.0,
        };
        let min_y = match valign {
            VerticalAlign::Center => position.y() - size.height() / 2.0,
            // Ascent is roughly 80% of the font size
            VerticalAlign::Baseline => position.y() - self.definition.font_size() * 0.8,
        };
        Bounds::new_from_top_left(Point::new(min_x, min_y), size)
    }

    /// Renders the text as an SVG `<text>` element at an output-space point.
    pub fn render_svg(
        &self,
        position: Point,
        anchor: TextAnchor,
        valign: VerticalAlign,
    ) -> svg_element::Text {
        let line_height = self.definition.line_height();
        let lines: Vec<&str> = self.lines().collect();

        // The first tspan advances by one line, so start one line above
        let first_line_y = match valign {
            VerticalAlign::Center => {
                position.y() - (lines.len().saturating_sub(1) as f32) * line_height / 2.0
            }
            VerticalAlign::Baseline => position.y(),
        };

        let mut rendered = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", first_line_y - line_height)
            .set("text-anchor", anchor.to_svg_value())
            .set("font-size", self.definition.font_size())
            .set("font-weight", self.definition.weight().to_svg_value())
            .set("fill", &self.definition.color())
            .set("fill-opacity", self.definition.color().alpha());

        if valign == VerticalAlign::Center {
            rendered = rendered.set("dominant-baseline", "central");
        }
        if let Some(family) = self.definition.font_family() {
            rendered = rendered.set("font-family", family);
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered = rendered.add(tspan);
        }

        rendered
    }
}

/// Free-standing text placed on the canvas.
///
/// Used for captions and for titles overlaid on boxes whose own title is
/// empty.
#[derive(Debug, Clone)]
pub struct PlacedText<'a> {
    text: Text<'a>,
    position: Point,
    anchor: TextAnchor,
    valign: VerticalAlign,
    z: ZOrder,
}

impl<'a> PlacedText<'a> {
    /// Creates a label at a logical `position`
    pub fn new(text: Text<'a>, position: Point, z: ZOrder) -> Self {
        Self {
            text,
            position,
            anchor: TextAnchor::default(),
            valign: VerticalAlign::default(),
            z,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }
}

impl Drawable for PlacedText<'_> {
    fn render_to_layers(&self, canvas: &Canvas) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.text.content().is_empty() {
            return output;
        }
        let position = canvas.to_output(self.position);
        output.add(
            self.z,
            Box::new(self.text.render_svg(position, self.anchor, self.valign)),
        );
        output
    }

    fn bounds(&self, canvas: &Canvas) -> Option<Bounds> {
        if self.text.content().is_empty() {
            return None;
        }
        let position = canvas.to_output(self.position);
        Some(self.text.bounds_at(position, self.anchor, self.valign))
    }
}

/// Shared cosmic-text font system for measuring text.
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Measure `text` in points.
    ///
    /// Falls back to an estimate from the character count when the font
    /// system has no usable font.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let font_size = text_def.font_size();
        let line_height = text_def.line_height();
        let line_count = text.lines().count().max(1);
        let total_height = line_count as f32 * line_height;

        let measured_width = self.measure_width(text, text_def);
        let width = if measured_width > 0.0 {
            measured_width
        } else {
            let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            longest as f32 * font_size * FALLBACK_ADVANCE
        };

        Size::new(width, total_height)
    }

    fn measure_width(&self, text: &str, text_def: &TextDefinition) -> f32 {
        let Ok(mut font_system) = self.font_system.lock() else {
            return 0.0;
        };

        let metrics = Metrics::new(text_def.font_size(), text_def.line_height());
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let family = text_def.font_family().unwrap_or(DEFAULT_FONT_FAMILY);
        let attrs = Attrs::new()
            .family(Family::Name(family))
            .weight(text_def.weight().to_cosmic());

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
            .fold(0.0, f32::max)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(13.0, 8.0, (0.0, 13.0), (0.0, 8.0)).unwrap()
    }

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::default();
        assert_approx_eq!(f32, def.font_size(), 11.0);
        assert_eq!(def.weight(), FontWeight::Bold);
        assert_eq!(def.color().to_string(), "#000000");
        assert!(def.font_family().is_none());
        assert_approx_eq!(f32, def.line_height(), 13.2, epsilon = 1e-4);
    }

    #[test]
    fn test_empty_text_has_zero_size() {
        let def = TextDefinition::default();
        assert_eq!(Text::new(&def, "").calculate_size(), Size::default());
    }

    #[test]
    fn test_text_height_counts_lines() {
        let def = TextDefinition::new().with_font_size(10.0);
        let one = Text::new(&def, "Edge").calculate_size();
        let two = Text::new(&def, "Edge\nNetwork").calculate_size();
        assert_approx_eq!(f32, one.height(), 12.0, epsilon = 1e-4);
        assert_approx_eq!(f32, two.height(), 24.0, epsilon = 1e-4);
        assert!(one.width() > 0.0);
    }

    #[test]
    fn test_longer_text_is_wider() {
        let def = TextDefinition::default();
        let short = Text::new(&def, "BBS").calculate_size();
        let long = Text::new(&def, "Cloudflare Platform").calculate_size();
        assert!(long.width() > short.width());
    }

    #[test]
    fn test_render_svg_one_tspan_per_line() {
        let def = TextDefinition::new().with_color(Color::new("#E65100").unwrap());
        let svg = Text::new(&def, "Edge\nNetwork")
            .render_svg(Point::new(50.0, 50.0), TextAnchor::Middle, VerticalAlign::Center)
            .to_string();

        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("Network"));
        assert!(svg.contains("fill=\"#e65100\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("dominant-baseline=\"central\""));
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_render_svg_baseline_start() {
        let def = TextDefinition::new().with_font_family("Helvetica");
        let svg = Text::new(&def, "Cloudflare Platform")
            .render_svg(Point::new(0.0, 0.0), TextAnchor::Start, VerticalAlign::Baseline)
            .to_string();

        assert!(svg.contains("text-anchor=\"start\""));
        assert!(!svg.contains("dominant-baseline"));
        assert!(svg.contains("font-family=\"Helvetica\""));
    }

    #[test]
    fn test_bounds_at_middle_is_centered() {
        let def = TextDefinition::default();
        let text = Text::new(&def, "Worker (Hono)");
        let bounds = text.bounds_at(
            Point::new(100.0, 100.0),
            TextAnchor::Middle,
            VerticalAlign::Center,
        );
        assert_approx_eq!(f32, bounds.center().x(), 100.0, epsilon = 1e-3);
        assert_approx_eq!(f32, bounds.center().y(), 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_bounds_at_start_begins_at_anchor() {
        let def = TextDefinition::default();
        let bounds = Text::new(&def, "Build Phase").bounds_at(
            Point::new(20.0, 40.0),
            TextAnchor::Start,
            VerticalAlign::Baseline,
        );
        assert_approx_eq!(f32, bounds.min_x(), 20.0);
        assert!(bounds.min_y() < 40.0);
    }

    #[test]
    fn test_label_renders_at_z() {
        let def = TextDefinition::default();
        let label = PlacedText::new(Text::new(&def, "Counter"), Point::new(9.9, 5.45), 16);

        let output = label.render_to_layers(&canvas());
        assert_eq!(output.z_orders(), vec![16]);

        let bounds = label.bounds(&canvas()).unwrap();
        assert_approx_eq!(f32, bounds.center().x(), 9.9 * 72.0, epsilon = 1e-2);
    }

    #[test]
    fn test_empty_label_draws_nothing() {
        let def = TextDefinition::default();
        let label = PlacedText::new(Text::new(&def, ""), Point::new(1.0, 1.0), 16);
        assert!(label.render_to_layers(&canvas()).is_empty());
        assert!(label.bounds(&canvas()).is_none());
    }
}
