//! Grouping frames.
//!
//! A [`Frame`] is a rounded rectangle, usually dashed and unfilled, with a
//! caption inside its top edge. Frames are pure decoration: nothing checks
//! that the boxes drawn "inside" one actually fit.

use crate::{
    canvas::Canvas,
    draw::{Drawable, LayeredOutput, RoundedBox, Text, TextAnchor, VerticalAlign},
    geometry::{Bounds, Point},
};

/// Distance of the caption from the top edge, and from the left edge when
/// start-aligned, in logical units.
pub const CAPTION_INSET: f32 = 0.3;

/// Where a frame's caption sits along its top edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionAlign {
    /// Top-left interior, text starting at the inset
    #[default]
    Start,
    /// Horizontally centered, text centered on the anchor
    Center,
}

/// A grouping frame with a caption.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    shape: RoundedBox,
    caption: Text<'a>,
    align: CaptionAlign,
}

impl<'a> Frame<'a> {
    pub fn new(shape: RoundedBox, caption: Text<'a>, align: CaptionAlign) -> Self {
        Self {
            shape,
            caption,
            align,
        }
    }

    /// Logical anchor of the caption with its alignment
    fn caption_anchor(&self) -> (Point, TextAnchor, VerticalAlign) {
        let rect = self.shape.rect();
        let y = rect.max_y() - CAPTION_INSET;
        match self.align {
            CaptionAlign::Start => (
                Point::new(rect.x() + CAPTION_INSET, y),
                TextAnchor::Start,
                VerticalAlign::Baseline,
            ),
            CaptionAlign::Center => (
                Point::new(rect.center().x(), y),
                TextAnchor::Middle,
                VerticalAlign::Center,
            ),
        }
    }
}

impl Drawable for Frame<'_> {
    fn render_to_layers(&self, canvas: &Canvas) -> LayeredOutput {
        let mut output = self.shape.render_to_layers(canvas);
        if !self.caption.content().is_empty() {
            let (at, anchor, valign) = self.caption_anchor();
            let rendered = self
                .caption
                .render_svg(canvas.to_output(at), anchor, valign);
            output.add(self.shape.z() + 1, Box::new(rendered));
        }
        output
    }

    fn bounds(&self, canvas: &Canvas) -> Option<Bounds> {
        let shape_bounds = self.shape.bounds(canvas)?;
        if self.caption.content().is_empty() {
            return Some(shape_bounds);
        }
        let (at, anchor, valign) = self.caption_anchor();
        let caption_bounds = self
            .caption
            .bounds_at(canvas.to_output(at), anchor, valign);
        Some(shape_bounds.merge(&caption_bounds))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        color::Color,
        draw::{StrokeDefinition, TextDefinition},
        geometry::Rect,
    };

    fn platform(align: CaptionAlign) -> (RoundedBox, CaptionAlign) {
        let shape = RoundedBox::new(
            Rect::new(3.0, 0.5, 9.5, 7.0),
            StrokeDefinition::dashed(Color::new("#B0BEC5").unwrap(), 1.0),
            1,
        )
        .with_pad(0.2);
        (shape, align)
    }

    #[test]
    fn test_caption_start_alignment() {
        let def = TextDefinition::default();
        let (shape, align) = platform(CaptionAlign::Start);
        let frame = Frame::new(shape, Text::new(&def, "Cloudflare Platform"), align);
        let (at, anchor, valign) = frame.caption_anchor();
        assert_approx_eq!(f32, at.x(), 3.3, epsilon = 1e-5);
        assert_approx_eq!(f32, at.y(), 7.2, epsilon = 1e-5);
        assert_eq!(anchor, TextAnchor::Start);
        assert_eq!(valign, VerticalAlign::Baseline);
    }

    #[test]
    fn test_caption_center_alignment() {
        let def = TextDefinition::default();
        let shape = RoundedBox::new(
            Rect::new(9.0, 1.0, 3.2, 6.0),
            StrokeDefinition::dotted(Color::new("#455A64").unwrap(), 1.0),
            5,
        );
        let frame = Frame::new(shape, Text::new(&def, "Durable Objects"), CaptionAlign::Center);
        let (at, anchor, _) = frame.caption_anchor();
        assert_approx_eq!(f32, at.x(), 10.6, epsilon = 1e-5);
        assert_approx_eq!(f32, at.y(), 6.7, epsilon = 1e-5);
        assert_eq!(anchor, TextAnchor::Middle);
    }

    #[test]
    fn test_caption_drawn_above_frame() {
        let def = TextDefinition::default();
        let canvas = Canvas::new(13.0, 8.0, (0.0, 13.0), (0.0, 8.0)).unwrap();
        let (shape, align) = platform(CaptionAlign::Start);
        let frame = Frame::new(shape, Text::new(&def, "Cloudflare Platform"), align);

        let output = frame.render_to_layers(&canvas);
        assert_eq!(output.z_orders(), vec![1, 2]);
    }
}
