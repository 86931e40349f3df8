//! Geometric primitives for diagram placement and rendering.
//!
//! This module provides the geometric types shared by the scene model and the
//! drawing primitives.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - A rectangle in logical canvas space, anchored at its lower-left corner
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate Systems
//!
//! Two coordinate spaces are in play:
//!
//! ```text
//!  logical (scene)              output (SVG, points)
//!
//!    +Y                           (0,0) ────────► +X
//!     ▲                             │
//!     │                             │
//!     │                             ▼
//!   (0,0) ────────► +X             +Y
//! ```
//!
//! Scene elements are declared in logical units with the Y axis pointing up.
//! The [`Canvas`](crate::canvas::Canvas) maps them into output space, where
//! one unit is one typographic point and the Y axis points down. [`Point`],
//! [`Size`] and [`Bounds`] are used in both spaces; [`Rect`] is logical only.

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use archdraw_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the Euclidean length of the point treated as a vector
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns a zero-size bounds located at this point
    pub fn to_bounds(self) -> Bounds {
        Bounds {
            min_x: self.x,
            min_y: self.y,
            max_x: self.x,
            max_y: self.y,
        }
    }
}

/// Width and height of an element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both dimensions are finite and strictly positive
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Which side of a rectangle a point sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// A rectangle in logical canvas space.
///
/// `(x, y)` is the lower-left corner; `y` grows upward. This is how nodes and
/// groups are declared in a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a rectangle from its lower-left corner and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(self) -> f32 {
        self.origin.x
    }

    pub fn y(self) -> f32 {
        self.origin.y
    }

    pub fn width(self) -> f32 {
        self.size.width
    }

    pub fn height(self) -> f32 {
        self.size.height
    }

    pub fn size(self) -> Size {
        self.size
    }

    /// Right edge (`x + width`)
    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Top edge (`y + height`)
    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns the rectangle as min/max bounds in logical space
    pub fn to_bounds(self) -> Bounds {
        Bounds {
            min_x: self.x(),
            min_y: self.y(),
            max_x: self.max_x(),
            max_y: self.max_y(),
        }
    }

    /// Grows the rectangle by `pad` on every side
    pub fn inflate(self, pad: f32) -> Self {
        Self::new(
            self.x() - pad,
            self.y() - pad,
            self.width() + 2.0 * pad,
            self.height() + 2.0 * pad,
        )
    }

    /// Returns the point on `side`, either at its midpoint or at the given
    /// coordinate along it (a y value for left/right, an x value for
    /// top/bottom). Returns `None` when `along` falls outside the side.
    pub fn point_on_side(self, side: Side, along: Option<f32>) -> Option<Point> {
        let center = self.center();
        let (lo, hi, mid) = match side {
            Side::Left | Side::Right => (self.y(), self.max_y(), center.y),
            Side::Top | Side::Bottom => (self.x(), self.max_x(), center.x),
        };
        let t = along.unwrap_or(mid);
        if !(lo..=hi).contains(&t) {
            return None;
        }
        Some(match side {
            Side::Left => Point::new(self.x(), t),
            Side::Right => Point::new(self.max_x(), t),
            Side::Top => Point::new(t, self.max_y()),
            Side::Bottom => Point::new(t, self.y()),
        })
    }

    /// Distance from `point` to the closest point of the rectangle's outline.
    pub fn distance_to_outline(self, point: Point) -> f32 {
        let inside = point.x >= self.x()
            && point.x <= self.max_x()
            && point.y >= self.y()
            && point.y <= self.max_y();
        if inside {
            (point.x - self.x())
                .min(self.max_x() - point.x)
                .min(point.y - self.y())
                .min(self.max_y() - point.y)
        } else {
            let dx = (self.x() - point.x).max(0.0).max(point.x - self.max_x());
            let dy = (self.y() - point.y).max(0.0).max(point.y - self.max_y());
            dx.hypot(dy)
        }
    }

    /// Find where the ray from the rectangle's center toward `target` leaves
    /// the rectangle.
    ///
    /// Falls back to `target` when the ray is degenerate (target at the
    /// center, or a zero-size rectangle).
    pub fn boundary_toward(self, target: Point) -> Point {
        find_rectangle_intersection(self.center(), target, self.size)
    }
}

fn find_rectangle_intersection(a: Point, b: Point, a_size: Size) -> Point {
    let half_width = a_size.width() / 2.0;
    let half_height = a_size.height() / 2.0;

    let dist = b.sub_point(a);

    let length = dist.hypot();
    if length < 0.001 {
        return b;
    }

    let dx_norm = dist.x() / length;
    let dy_norm = dist.y() / length;

    // Distance along the ray to each edge line
    let t_low = -half_height / dy_norm;
    let t_high = half_height / dy_norm;
    let t_left = -half_width / dx_norm;
    let t_right = half_width / dx_norm;

    let mut t = f32::MAX;

    for t_edge in [t_low, t_high] {
        if t_edge.is_finite() && t_edge > 0.0 && t_edge < t {
            let x = dx_norm.mul_add(t_edge, a.x());
            if x >= a.x() - half_width && x <= a.x() + half_width {
                t = t_edge;
            }
        }
    }

    for t_edge in [t_left, t_right] {
        if t_edge.is_finite() && t_edge > 0.0 && t_edge < t {
            let y = dy_norm.mul_add(t_edge, a.y());
            if y >= a.y() - half_height && y <= a.y() + half_height {
                t = t_edge;
            }
        }
    }

    if t == f32::MAX || !t.is_finite() {
        return b;
    }

    Point::new(dx_norm.mul_add(t, a.x()), dy_norm.mul_add(t, a.y()))
}

/// An axis-aligned box defined by minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from two opposite corners, in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the smallest bounds containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use archdraw_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let b = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = a.merge(&b);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by the given insets
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Returns true if `other` lies entirely within these bounds (edges inclusive)
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Returns true if the point lies within these bounds (edges inclusive)
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// Spacing around an element with potentially different values per side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_approx_eq!(f32, actual.x(), expected.x(), epsilon = 1e-4);
        assert_approx_eq!(f32, actual.y(), expected.y(), epsilon = 1e-4);
    }

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(4.0, 6.0);

        assert_point_eq(p1.add_point(p2), Point::new(5.0, 8.0));
        assert_point_eq(p2.sub_point(p1), Point::new(3.0, 4.0));
        assert_approx_eq!(f32, p1.distance(p2), 5.0);
        assert_point_eq(p1.scale(2.0), Point::new(2.0, 4.0));
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(1.0, 0.5).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(1.0, -1.0).is_positive());
        assert!(!Size::new(f32::NAN, 1.0).is_positive());
    }

    #[test]
    fn test_rect_edges_and_center() {
        let rect = Rect::new(0.5, 3.5, 1.8, 1.0);
        assert_approx_eq!(f32, rect.max_x(), 2.3);
        assert_approx_eq!(f32, rect.max_y(), 4.5);
        assert_point_eq(rect.center(), Point::new(1.4, 4.0));
    }

    #[test]
    fn test_rect_inflate() {
        let rect = Rect::new(1.0, 1.0, 2.0, 1.0).inflate(0.1);
        assert_approx_eq!(f32, rect.x(), 0.9);
        assert_approx_eq!(f32, rect.y(), 0.9);
        assert_approx_eq!(f32, rect.width(), 2.2);
        assert_approx_eq!(f32, rect.height(), 1.2);
    }

    #[test]
    fn test_rect_point_on_side_midpoints() {
        let rect = Rect::new(0.0, 0.0, 2.0, 1.0);
        assert_point_eq(
            rect.point_on_side(Side::Left, None).unwrap(),
            Point::new(0.0, 0.5),
        );
        assert_point_eq(
            rect.point_on_side(Side::Right, None).unwrap(),
            Point::new(2.0, 0.5),
        );
        assert_point_eq(
            rect.point_on_side(Side::Top, None).unwrap(),
            Point::new(1.0, 1.0),
        );
        assert_point_eq(
            rect.point_on_side(Side::Bottom, None).unwrap(),
            Point::new(1.0, 0.0),
        );
    }

    #[test]
    fn test_rect_point_on_side_along() {
        let rect = Rect::new(5.8, 1.5, 2.5, 3.2);
        assert_point_eq(
            rect.point_on_side(Side::Right, Some(4.0)).unwrap(),
            Point::new(8.3, 4.0),
        );
        assert!(rect.point_on_side(Side::Right, Some(5.0)).is_none());
        assert!(rect.point_on_side(Side::Top, Some(1.0)).is_none());
    }

    #[test]
    fn test_rect_distance_to_outline() {
        let rect = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert_approx_eq!(f32, rect.distance_to_outline(Point::new(2.0, 1.0)), 0.0);
        assert_approx_eq!(f32, rect.distance_to_outline(Point::new(1.0, 1.0)), 1.0);
        assert_approx_eq!(f32, rect.distance_to_outline(Point::new(3.0, 1.0)), 1.0);
        assert_approx_eq!(f32, rect.distance_to_outline(Point::new(5.0, 6.0)), 5.0);
    }

    #[test]
    fn test_boundary_toward_axis_aligned() {
        // 40x40 rectangle centered at (100, 100)
        let rect = Rect::new(80.0, 80.0, 40.0, 40.0);

        assert_point_eq(
            rect.boundary_toward(Point::new(200.0, 100.0)),
            Point::new(120.0, 100.0),
        );
        assert_point_eq(
            rect.boundary_toward(Point::new(0.0, 100.0)),
            Point::new(80.0, 100.0),
        );
        assert_point_eq(
            rect.boundary_toward(Point::new(100.0, 200.0)),
            Point::new(100.0, 120.0),
        );
        assert_point_eq(
            rect.boundary_toward(Point::new(100.0, 0.0)),
            Point::new(100.0, 80.0),
        );
    }

    #[test]
    fn test_boundary_toward_diagonal_hits_corner() {
        let rect = Rect::new(80.0, 80.0, 40.0, 40.0);
        assert_point_eq(
            rect.boundary_toward(Point::new(200.0, 200.0)),
            Point::new(120.0, 120.0),
        );
    }

    #[test]
    fn test_boundary_toward_degenerate_falls_back() {
        let rect = Rect::new(80.0, 80.0, 40.0, 40.0);
        let center = Point::new(100.0, 100.0);
        assert_point_eq(rect.boundary_toward(center), center);

        let empty = Rect::new(100.0, 100.0, 0.0, 0.0);
        let target = Point::new(200.0, 100.0);
        assert_point_eq(empty.boundary_toward(target), target);
    }

    #[test]
    fn test_bounds_merge_and_contains() {
        let a = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(2.0, 1.0));
        let b = Bounds::from_corners(Point::new(7.0, 1.0), Point::new(5.0, 0.0));
        let merged = a.merge(&b);

        assert_approx_eq!(f32, merged.min_x(), 0.0);
        assert_approx_eq!(f32, merged.max_x(), 7.0);
        assert!(merged.contains(&a));
        assert!(merged.contains(&b));
        assert!(!a.contains(&merged));
        assert!(merged.contains_point(Point::new(3.5, 0.5)));
    }

    #[test]
    fn test_bounds_add_padding() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(10.0, 10.0))
            .add_padding(Insets::uniform(7.2));
        assert_approx_eq!(f32, bounds.min_x(), 2.8, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.min_y(), 2.8, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.width(), 24.4, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.max_y(), 27.2, epsilon = 1e-5);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-100.0f32..100.0, -100.0f32..100.0, 0.1f32..50.0, 0.1f32..50.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// The ray intersection lies on the outline, or falls back to the target.
    fn check_boundary_toward_on_outline(rect: Rect, target: Point) -> Result<(), TestCaseError> {
        let result = rect.boundary_toward(target);

        prop_assert!(result.x().is_finite() && result.y().is_finite());

        let on_outline = rect.distance_to_outline(result) < 0.01;
        let is_fallback = approx_eq!(f32, result.x(), target.x(), epsilon = 0.01)
            && approx_eq!(f32, result.y(), target.y(), epsilon = 0.01);
        prop_assert!(
            on_outline || is_fallback,
            "{result:?} is neither on the outline of {rect:?} nor the target {target:?}"
        );
        Ok(())
    }

    /// Midpoints of every side are on the outline and inside the rectangle bounds.
    fn check_side_midpoints_on_outline(rect: Rect) -> Result<(), TestCaseError> {
        for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
            let point = rect.point_on_side(side, None);
            prop_assert!(point.is_some());
            let point = point.unwrap_or_default();
            prop_assert!(rect.distance_to_outline(point) < 1e-3);
            prop_assert!(rect.to_bounds().contains_point(point));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn boundary_toward_on_outline(rect in rect_strategy(), target in point_strategy()) {
            check_boundary_toward_on_outline(rect, target)?;
        }

        #[test]
        fn side_midpoints_on_outline(rect in rect_strategy()) {
            check_side_midpoints_on_outline(rect)?;
        }
    }
}
