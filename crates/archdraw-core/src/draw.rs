//! Drawable components for diagram rendering.
//!
//! All drawables implement the [`Drawable`] trait: they render themselves into
//! a [`LayeredOutput`] of z-ordered SVG nodes and report the output-space
//! bounds they cover. Drawables are declared in logical canvas coordinates and
//! use the [`Canvas`] to map into output space.

mod arrow;
mod boundary;
mod layer;
mod node;
mod shape;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDrawer, ArrowPath, LabelPosition};
pub use boundary::{CAPTION_INSET, CaptionAlign, Frame};
pub use layer::{Layer, LayeredOutput, SvgNode, ZOrder};
pub use node::{LabeledBox, SUBTEXT_OFFSET, TITLE_OFFSET};
pub use shape::{DEFAULT_BOX_PAD, RoundedBox};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{
    DEFAULT_FONT_FAMILY, FontWeight, PlacedText, Text, TextAnchor, TextDefinition, VerticalAlign,
};

use crate::{canvas::Canvas, geometry::Bounds};

/// A diagram element that can be rendered to z-ordered SVG output.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable into one or more z-orders.
    ///
    /// Composite drawables emit parts at different z-orders, such as a box at
    /// `z` and its text at `z + 1`.
    fn render_to_layers(&self, canvas: &Canvas) -> LayeredOutput;

    /// Output-space bounds of everything this drawable paints, or `None` if
    /// it paints nothing.
    fn bounds(&self, canvas: &Canvas) -> Option<Bounds>;
}
