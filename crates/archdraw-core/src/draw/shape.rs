//! Rounded rectangle geometry shared by boxes and frames.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    canvas::Canvas,
    color::Color,
    draw::{Drawable, LayeredOutput, StrokeDefinition, ZOrder},
    geometry::{Bounds, Insets, Rect},
};

/// Padding added around a box, in logical units. Also its corner radius.
pub const DEFAULT_BOX_PAD: f32 = 0.1;

/// A rectangle grown by `pad` on every side with corners rounded by `pad`.
///
/// The corner radius depends only on the padding, never on the rectangle's
/// size, so small boxes look proportionally rounder than large ones.
///
/// ```
/// # use archdraw_core::canvas::Canvas;
/// # use archdraw_core::color::Color;
/// # use archdraw_core::draw::{Drawable, RoundedBox, StrokeDefinition};
/// # use archdraw_core::geometry::Rect;
/// let canvas = Canvas::new(13.0, 8.0, (0.0, 13.0), (0.0, 8.0)).unwrap();
/// let shape = RoundedBox::new(Rect::new(0.5, 3.5, 1.8, 1.0), StrokeDefinition::default(), 10)
///     .with_fill(Color::new("#E3F2FD").unwrap());
///
/// // 1.8 wide plus 0.1 padding on each side, at 72 points per unit
/// let bounds = shape.outline(&canvas);
/// assert!((bounds.width() - 144.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct RoundedBox {
    rect: Rect,
    pad: f32,
    fill: Option<Color>,
    stroke: StrokeDefinition,
    z: ZOrder,
}

impl RoundedBox {
    /// Creates an unfilled box with the default padding
    pub fn new(rect: Rect, stroke: StrokeDefinition, z: ZOrder) -> Self {
        Self {
            rect,
            pad: DEFAULT_BOX_PAD,
            fill: None,
            stroke,
            z,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_pad(mut self, pad: f32) -> Self {
        self.pad = pad;
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn z(&self) -> ZOrder {
        self.z
    }

    /// Output-space bounds of the padded outline, excluding the stroke
    pub fn outline(&self, canvas: &Canvas) -> Bounds {
        canvas.rect_to_output(self.rect.inflate(self.pad))
    }
}

impl Drawable for RoundedBox {
    fn render_to_layers(&self, canvas: &Canvas) -> LayeredOutput {
        let outline = self.outline(canvas);
        let radius = canvas.length_to_output(self.pad);

        let mut rect = svg_element::Rectangle::new()
            .set("x", outline.min_x())
            .set("y", outline.min_y())
            .set("width", outline.width())
            .set("height", outline.height())
            .set("rx", radius)
            .set("ry", radius);

        rect = match self.fill {
            Some(fill) => rect
                .set("fill", &fill)
                .set("fill-opacity", fill.alpha()),
            None => rect.set("fill", "none"),
        };
        let rect = apply_stroke!(rect, &self.stroke);

        let mut output = LayeredOutput::new();
        output.add(self.z, Box::new(rect));
        output
    }

    fn bounds(&self, canvas: &Canvas) -> Option<Bounds> {
        let half_stroke = self.stroke.width() / 2.0;
        Some(
            self.outline(canvas)
                .add_padding(Insets::uniform(half_stroke)),
        )
    }
}
