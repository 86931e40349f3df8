//! Directed connectors and their SVG arrowhead markers.
//!
//! An [`Arrow`] runs between two logical points, straight or bent into a
//! quadratic arc, with a single arrowhead at its end and an optional label.
//! Arrowheads are SVG markers shared by every arrow of the same color; the
//! [`ArrowDrawer`] collects those colors while arrows are drawn and emits the
//! marker definitions afterwards.

use indexmap::IndexMap;
use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    canvas::Canvas,
    color::Color,
    draw::{Drawable, LayeredOutput, StrokeDefinition, Text, TextAnchor, VerticalAlign, ZOrder},
    geometry::{Bounds, Insets, Point},
};

/// Arrowhead size in multiples of the line width.
const HEAD_SIZE: f32 = 4.0;

/// Clearance between a midpoint label and its connector, in points.
const LABEL_GAP: f32 = 2.0;

/// Shape of the connector between the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowPath {
    Straight,
    /// Quadratic arc whose control point sits `rad` times the chord length
    /// away from the chord midpoint. Positive values bend to the right of the
    /// direction of travel, negative values to the left.
    Arc(f32),
}

impl ArrowPath {
    /// `0` is straight, anything else an arc with that radius factor
    pub fn from_curvature(rad: f32) -> Self {
        if rad == 0.0 {
            Self::Straight
        } else {
            Self::Arc(rad)
        }
    }

    /// Logical control point of the curve between `start` and `end`, or
    /// `None` for a straight path.
    pub fn control_point(self, start: Point, end: Point) -> Option<Point> {
        match self {
            Self::Straight => None,
            Self::Arc(rad) => {
                let d = end.sub_point(start);
                let offset = Point::new(d.y(), -d.x()).scale(rad);
                Some(start.midpoint(end).add_point(offset))
            }
        }
    }

    /// Point at parameter `t` in `0.0..=1.0` along the path
    pub fn point_at(self, start: Point, end: Point, t: f32) -> Point {
        match self.control_point(start, end) {
            None => start.add_point(end.sub_point(start).scale(t)),
            Some(c) => {
                let u = 1.0 - t;
                start
                    .scale(u * u)
                    .add_point(c.scale(2.0 * u * t))
                    .add_point(end.scale(t * t))
            }
        }
    }
}

/// Where an arrow's label is anchored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum LabelPosition {
    /// Middle of the connector, on the curve for arcs
    #[default]
    Midpoint,
    /// The arrow's start point
    Source,
    /// An explicit logical point
    At(Point),
}

/// A directed connector with an arrowhead at its end.
#[derive(Debug, Clone)]
pub struct Arrow<'a> {
    start: Point,
    end: Point,
    path: ArrowPath,
    stroke: StrokeDefinition,
    label: Option<(Text<'a>, LabelPosition)>,
    z: ZOrder,
}

impl<'a> Arrow<'a> {
    /// Creates a straight, unlabeled arrow between logical points
    pub fn new(start: Point, end: Point, stroke: StrokeDefinition, z: ZOrder) -> Self {
        Self {
            start,
            end,
            path: ArrowPath::Straight,
            stroke,
            label: None,
            z,
        }
    }

    pub fn with_path(mut self, path: ArrowPath) -> Self {
        self.path = path;
        self
    }

    pub fn with_label(mut self, text: Text<'a>, position: LabelPosition) -> Self {
        self.label = Some((text, position));
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn color(&self) -> Color {
        self.stroke.color()
    }

    /// Logical anchor of the label, if it has non-empty text
    pub fn label_anchor(&self) -> Option<Point> {
        let (text, position) = self.label.as_ref()?;
        if text.content().is_empty() {
            return None;
        }
        Some(match position {
            LabelPosition::Midpoint => self.path.point_at(self.start, self.end, 0.5),
            LabelPosition::Source => self.start,
            LabelPosition::At(point) => *point,
        })
    }

    /// Output-space center of the label, if it has non-empty text.
    ///
    /// Midpoint labels are pushed off the connector along its normal, toward
    /// the top of the page, until their box clears the line.
    pub fn label_center(&self, canvas: &Canvas) -> Option<Point> {
        let (text, position) = self.label.as_ref()?;
        let anchor = canvas.to_output(self.label_anchor()?);
        if !matches!(position, LabelPosition::Midpoint) {
            return Some(anchor);
        }

        // The tangent of a quadratic at t = 0.5 is parallel to its chord
        let chord = canvas
            .to_output(self.end)
            .sub_point(canvas.to_output(self.start));
        let length = chord.hypot();
        if length == 0.0 {
            return Some(anchor);
        }
        let mut normal = Point::new(chord.y() / length, -chord.x() / length);
        if normal.y() > 0.0 || (normal.y() == 0.0 && normal.x() < 0.0) {
            normal = normal.scale(-1.0);
        }

        let size = text.calculate_size();
        let offset =
            (normal.x().abs() * size.width() + normal.y().abs() * size.height()) / 2.0 + LABEL_GAP;
        Some(anchor.add_point(normal.scale(offset)))
    }

    /// SVG path data in output space
    pub fn path_data(&self, canvas: &Canvas) -> String {
        let start = canvas.to_output(self.start);
        let end = canvas.to_output(self.end);
        match self.path.control_point(self.start, self.end) {
            None => format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y()),
            Some(control) => {
                let c = canvas.to_output(control);
                format!(
                    "M {} {} Q {} {} {} {}",
                    start.x(),
                    start.y(),
                    c.x(),
                    c.y(),
                    end.x(),
                    end.y()
                )
            }
        }
    }

    fn marker_id(color: Color) -> String {
        format!("arrow-head-{}", color.to_id_safe_string())
    }

    fn create_marker(color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", Self::marker_id(color))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", HEAD_SIZE)
            .set("markerHeight", HEAD_SIZE)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 1 1 L 9 5 L 1 9")
                    .set("fill", "none")
                    .set("stroke", &color)
                    .set("stroke-opacity", color.alpha())
                    .set("stroke-width", 10.0 / HEAD_SIZE),
            )
    }

    /// Output-space bounds of the curve itself, using its axis extrema
    fn curve_bounds(&self, canvas: &Canvas) -> Bounds {
        let start = canvas.to_output(self.start);
        let end = canvas.to_output(self.end);
        let mut bounds = Bounds::from_corners(start, end);

        if let Some(control) = self.path.control_point(self.start, self.end) {
            let c = canvas.to_output(control);
            for t in [
                quadratic_extremum(start.x(), c.x(), end.x()),
                quadratic_extremum(start.y(), c.y(), end.y()),
            ]
            .into_iter()
            .flatten()
            {
                let p = canvas.to_output(self.path.point_at(self.start, self.end, t));
                bounds = bounds.merge(&p.to_bounds());
            }
        }

        bounds
    }
}

/// Parameter of the interior extremum of a 1-D quadratic Bezier, if any
fn quadratic_extremum(p0: f32, c: f32, p2: f32) -> Option<f32> {
    let denom = p0 - 2.0 * c + p2;
    if denom.abs() < f32::EPSILON {
        return None;
    }
    let t = (p0 - c) / denom;
    (t > 0.0 && t < 1.0).then_some(t)
}

impl Drawable for Arrow<'_> {
    fn render_to_layers(&self, canvas: &Canvas) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let path = svg_element::Path::new()
            .set("d", self.path_data(canvas))
            .set("fill", "none")
            .set(
                "marker-end",
                format!("url(#{})", Self::marker_id(self.color())),
            );
        let path = apply_stroke!(path, &self.stroke);
        output.add(self.z, Box::new(path));

        if let (Some((text, _)), Some(center)) = (&self.label, self.label_center(canvas)) {
            let rendered = text.render_svg(
                center,
                TextAnchor::Middle,
                VerticalAlign::Center,
            );
            output.add(self.z, Box::new(rendered));
        }

        output
    }

    fn bounds(&self, canvas: &Canvas) -> Option<Bounds> {
        let head = self.stroke.width() * HEAD_SIZE / 2.0;
        let mut bounds = self
            .curve_bounds(canvas)
            .add_padding(Insets::uniform(head.max(self.stroke.width() / 2.0)));

        if let (Some((text, _)), Some(center)) = (&self.label, self.label_center(canvas)) {
            let label_bounds = text.bounds_at(
                center,
                TextAnchor::Middle,
                VerticalAlign::Center,
            );
            bounds = bounds.merge(&label_bounds);
        }

        Some(bounds)
    }
}

/// Draws arrows and collects the arrowhead colors they need.
#[derive(Debug, Default)]
pub struct ArrowDrawer {
    heads: IndexMap<String, Color>,
}

impl ArrowDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders an arrow and registers its arrowhead color
    pub fn draw_arrow(&mut self, arrow: &Arrow, canvas: &Canvas) -> LayeredOutput {
        let color = arrow.color();
        self.heads.entry(Arrow::marker_id(color)).or_insert(color);
        arrow.render_to_layers(canvas)
    }

    /// Marker definitions for every color drawn so far, in first-use order.
    ///
    /// Returns `None` when no arrow has been drawn.
    pub fn draw_marker_definitions(&self) -> Option<svg_element::Definitions> {
        if self.heads.is_empty() {
            return None;
        }
        let defs = self
            .heads
            .values()
            .fold(svg_element::Definitions::new(), |defs, color| {
                defs.add(Arrow::create_marker(*color))
            });
        Some(defs)
    }
}
