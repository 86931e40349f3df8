//! The logical drawing surface.
//!
//! A [`Canvas`] pairs a physical figure size (in inches) with the logical
//! coordinate ranges that scene elements are declared in. It performs no
//! drawing itself; primitives ask it to map logical coordinates into output
//! space, where one unit is one typographic point (1/72 inch) and the Y axis
//! points down. There are no axes, ticks or frame.

use crate::{
    error::GeometryError,
    geometry::{Bounds, Point, Rect, Size},
};

/// Points per inch in output space.
pub const POINTS_PER_INCH: f32 = 72.0;

/// A fixed logical coordinate system over a figure of known physical size.
///
/// # Examples
///
/// ```
/// # use archdraw_core::canvas::Canvas;
/// # use archdraw_core::geometry::{Point, Rect};
/// let canvas = Canvas::new(13.0, 8.0, (0.0, 13.0), (0.0, 8.0)).unwrap();
///
/// // One logical unit is one inch here, i.e. 72 points.
/// let top_left = canvas.to_output(Point::new(0.0, 8.0));
/// assert_eq!(top_left, Point::new(0.0, 0.0));
///
/// assert!(canvas.contains(Rect::new(0.5, 3.5, 1.8, 1.0)));
/// assert!(!canvas.contains(Rect::new(12.0, 7.0, 2.0, 2.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    figure_size: Size,
    x_range: (f32, f32),
    y_range: (f32, f32),
}

impl Canvas {
    /// Create a canvas of `width` x `height` inches showing the logical
    /// ranges `x_range` and `y_range`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidCanvas`] for a non-positive figure
    /// size or an empty, inverted or non-finite range.
    pub fn new(
        width: f32,
        height: f32,
        x_range: (f32, f32),
        y_range: (f32, f32),
    ) -> Result<Self, GeometryError> {
        let figure_size = Size::new(width, height);
        if !figure_size.is_positive() {
            return Err(GeometryError::InvalidCanvas(format!(
                "figure size {width}x{height} must be positive"
            )));
        }
        for (axis, (lo, hi)) in [("x", x_range), ("y", y_range)] {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(GeometryError::InvalidCanvas(format!(
                    "{axis} range ({lo}, {hi}) must be finite and increasing"
                )));
            }
        }

        Ok(Self {
            figure_size,
            x_range,
            y_range,
        })
    }

    /// Figure size in inches
    pub fn figure_size(&self) -> Size {
        self.figure_size
    }

    /// Figure size in output points
    pub fn output_size(&self) -> Size {
        self.figure_size.scale(POINTS_PER_INCH)
    }

    pub fn x_range(&self) -> (f32, f32) {
        self.x_range
    }

    pub fn y_range(&self) -> (f32, f32) {
        self.y_range
    }

    /// The logical bounds of the canvas
    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(
            Point::new(self.x_range.0, self.y_range.0),
            Point::new(self.x_range.1, self.y_range.1),
        )
    }

    /// Returns true if the rectangle lies entirely within the canvas bounds
    pub fn contains(&self, rect: Rect) -> bool {
        self.bounds().contains(&rect.to_bounds())
    }

    /// Output points per logical unit along X
    pub fn x_scale(&self) -> f32 {
        self.output_size().width() / (self.x_range.1 - self.x_range.0)
    }

    /// Output points per logical unit along Y
    pub fn y_scale(&self) -> f32 {
        self.output_size().height() / (self.y_range.1 - self.y_range.0)
    }

    /// Convert a logical length to output points.
    ///
    /// Uses the X scale; the canvases used for diagrams keep both axes at the
    /// same scale so lengths such as corner radii stay isotropic.
    pub fn length_to_output(&self, length: f32) -> f32 {
        length * self.x_scale()
    }

    /// Map a logical point into output space
    pub fn to_output(&self, point: Point) -> Point {
        Point::new(
            (point.x() - self.x_range.0) * self.x_scale(),
            (self.y_range.1 - point.y()) * self.y_scale(),
        )
    }

    /// Map an output point back into logical space
    pub fn to_logical(&self, point: Point) -> Point {
        Point::new(
            point.x() / self.x_scale() + self.x_range.0,
            self.y_range.1 - point.y() / self.y_scale(),
        )
    }

    /// Map a logical rectangle into output-space bounds
    pub fn rect_to_output(&self, rect: Rect) -> Bounds {
        Bounds::from_corners(
            self.to_output(Point::new(rect.x(), rect.y())),
            self.to_output(Point::new(rect.max_x(), rect.max_y())),
        )
    }

    /// Map output-space bounds back into logical bounds
    pub fn bounds_to_logical(&self, bounds: Bounds) -> Bounds {
        Bounds::from_corners(
            self.to_logical(Point::new(bounds.min_x(), bounds.min_y())),
            self.to_logical(Point::new(bounds.max_x(), bounds.max_y())),
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn architecture_canvas() -> Canvas {
        Canvas::new(13.0, 8.0, (0.0, 13.0), (0.0, 8.0)).unwrap()
    }

    #[test]
    fn test_canvas_rejects_invalid_ranges() {
        assert!(Canvas::new(0.0, 8.0, (0.0, 13.0), (0.0, 8.0)).is_err());
        assert!(Canvas::new(13.0, 8.0, (5.0, 5.0), (0.0, 8.0)).is_err());
        assert!(Canvas::new(13.0, 8.0, (0.0, 13.0), (8.0, 0.0)).is_err());
        assert!(Canvas::new(13.0, 8.0, (0.0, f32::INFINITY), (0.0, 8.0)).is_err());
    }

    #[test]
    fn test_canvas_scales() {
        let canvas = architecture_canvas();
        assert_approx_eq!(f32, canvas.x_scale(), 72.0);
        assert_approx_eq!(f32, canvas.y_scale(), 72.0);
        assert_approx_eq!(f32, canvas.output_size().width(), 936.0);
        assert_approx_eq!(f32, canvas.output_size().height(), 576.0);
        assert_approx_eq!(f32, canvas.length_to_output(0.1), 7.2, epsilon = 1e-4);
    }

    #[test]
    fn test_canvas_to_output_flips_y() {
        let canvas = architecture_canvas();

        let origin = canvas.to_output(Point::new(0.0, 0.0));
        assert_approx_eq!(f32, origin.x(), 0.0);
        assert_approx_eq!(f32, origin.y(), 576.0);

        let p = canvas.to_output(Point::new(1.0, 7.0));
        assert_approx_eq!(f32, p.x(), 72.0);
        assert_approx_eq!(f32, p.y(), 72.0);
    }

    #[test]
    fn test_canvas_to_logical_inverts_to_output() {
        let canvas = Canvas::new(4.0, 2.0, (-1.0, 7.0), (-1.0, 3.0)).unwrap();
        let p = Point::new(2.5, 0.25);
        let back = canvas.to_logical(canvas.to_output(p));
        assert_approx_eq!(f32, back.x(), p.x(), epsilon = 1e-4);
        assert_approx_eq!(f32, back.y(), p.y(), epsilon = 1e-4);
    }

    #[test]
    fn test_canvas_rect_to_output() {
        let canvas = architecture_canvas();
        let bounds = canvas.rect_to_output(Rect::new(0.5, 3.5, 1.8, 1.0));
        assert_approx_eq!(f32, bounds.min_x(), 36.0, epsilon = 1e-3);
        assert_approx_eq!(f32, bounds.max_x(), 165.6, epsilon = 1e-3);
        assert_approx_eq!(f32, bounds.min_y(), 252.0, epsilon = 1e-3);
        assert_approx_eq!(f32, bounds.max_y(), 324.0, epsilon = 1e-3);
    }

    #[test]
    fn test_canvas_contains_edges_inclusive() {
        let canvas = architecture_canvas();
        assert!(canvas.contains(Rect::new(0.0, 0.0, 13.0, 8.0)));
        assert!(!canvas.contains(Rect::new(-0.1, 0.0, 1.0, 1.0)));
        assert!(!canvas.contains(Rect::new(3.0, 7.5, 1.0, 1.0)));
    }
}
