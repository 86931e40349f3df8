//! Error types for scene construction.
//!
//! Both error kinds describe mistakes in the scene description itself rather
//! than runtime conditions: a scene that produces one of them is wrong and has
//! to be fixed in the composer.

use thiserror::Error;

use crate::geometry::Side;

/// A violation of the geometric contract of the canvas or a scene element.
///
/// `element` is a short human-readable description such as `node "User"` or
/// `edge #3`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid canvas: {0}")]
    InvalidCanvas(String),

    #[error("{element} has non-positive size {width}x{height}")]
    NonPositiveSize {
        element: String,
        width: f32,
        height: f32,
    },

    #[error("{element} has invalid box padding {pad}")]
    InvalidPad { element: String, pad: f32 },

    #[error("{element} has a non-finite coordinate")]
    NonFinite { element: String },

    #[error("{element} lies outside the canvas bounds")]
    OutOfBounds { element: String },

    #[error("{element} starts and ends at the same point")]
    DegenerateEdge { element: String },

    #[error("{element} references unknown node #{node}")]
    UnknownNode { element: String, node: usize },

    #[error("{element} anchors at {along} which is outside the {side:?} side of its node")]
    AnchorOutsideSide {
        element: String,
        side: Side,
        along: f32,
    },
}

/// Errors raised while building or reading a [`Palette`](crate::palette::Palette).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette has no color for category `{0}`")]
    UnknownCategory(String),

    #[error("palette category `{category}`: {reason}")]
    InvalidColor { category: String, reason: String },
}
