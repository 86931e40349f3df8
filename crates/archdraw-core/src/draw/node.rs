//! Boxes with a title and optional subtext.

use crate::{
    canvas::Canvas,
    draw::{Drawable, LayeredOutput, RoundedBox, Text, TextAnchor, VerticalAlign},
    geometry::{Bounds, Point},
};

/// Upward offset of the title from the box center when subtext is present.
pub const TITLE_OFFSET: f32 = 0.15;

/// Downward offset of the subtext from the box center.
pub const SUBTEXT_OFFSET: f32 = 0.25;

/// A [`RoundedBox`] with centered text drawn one z-order above it.
///
/// Without subtext the title is centered in the box. With subtext the title
/// moves up by [`TITLE_OFFSET`] and the subtext sits [`SUBTEXT_OFFSET`] below
/// the center. An empty title is not drawn.
#[derive(Debug, Clone)]
pub struct LabeledBox<'a> {
    shape: RoundedBox,
    title: Text<'a>,
    subtext: Option<Text<'a>>,
}

impl<'a> LabeledBox<'a> {
    pub fn new(shape: RoundedBox, title: Text<'a>) -> Self {
        Self {
            shape,
            title,
            subtext: None,
        }
    }

    pub fn with_subtext(mut self, subtext: Text<'a>) -> Self {
        self.subtext = Some(subtext);
        self
    }

    /// Logical anchor points of the title and the subtext
    fn text_positions(&self) -> (Point, Option<Point>) {
        let center = self.shape.rect().center();
        match self.subtext {
            Some(_) => (
                center.with_y(center.y() + TITLE_OFFSET),
                Some(center.with_y(center.y() - SUBTEXT_OFFSET)),
            ),
            None => (center, None),
        }
    }

    /// Non-empty texts with their output-space anchors
    fn placed_texts(&self, canvas: &Canvas) -> Vec<(&Text<'a>, Point)> {
        let (title_at, subtext_at) = self.text_positions();
        let mut texts = Vec::with_capacity(2);
        if !self.title.content().is_empty() {
            texts.push((&self.title, canvas.to_output(title_at)));
        }
        if let (Some(subtext), Some(at)) = (&self.subtext, subtext_at) {
            if !subtext.content().is_empty() {
                texts.push((subtext, canvas.to_output(at)));
            }
        }
        texts
    }
}

impl Drawable for LabeledBox<'_> {
    fn render_to_layers(&self, canvas: &Canvas) -> LayeredOutput {
        let mut output = self.shape.render_to_layers(canvas);
        let text_z = self.shape.z() + 1;

        for (text, at) in self.placed_texts(canvas) {
            let rendered = text.render_svg(at, TextAnchor::Middle, VerticalAlign::Center);
            output.add(text_z, Box::new(rendered));
        }

        output
    }

    fn bounds(&self, canvas: &Canvas) -> Option<Bounds> {
        let shape_bounds = self.shape.bounds(canvas)?;
        Some(
            self.placed_texts(canvas)
                .into_iter()
                .map(|(text, at)| text.bounds_at(at, TextAnchor::Middle, VerticalAlign::Center))
                .fold(shape_bounds, |acc, b| acc.merge(&b)),
        )
    }
}
