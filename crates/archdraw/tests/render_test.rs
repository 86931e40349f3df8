//! Rendering properties checked against rasterized output.

use archdraw::{
    ArchdrawError, DiagramBuilder,
    canvas::Canvas,
    color::Color,
    config::{AppConfig, PaletteConfig, RenderConfig},
    export,
    draw::TextDefinition,
    geometry::{Point, Rect, Side},
    scene::{Edge, Endpoint, Group, Label, Node, Scene, SceneBuilder},
};
use float_cmp::assert_approx_eq;

/// Renders at 4 pixels per point.
const DPI: f32 = 288.0;

fn builder() -> DiagramBuilder {
    DiagramBuilder::new(AppConfig::new(
        RenderConfig::new(DPI, 7.2),
        PaletteConfig::new(),
    ))
}

fn color(css: &str) -> Color {
    Color::new(css).unwrap()
}

fn two_node_scene() -> Scene {
    let canvas = Canvas::new(8.0, 2.0, (-0.5, 7.5), (-0.5, 1.5)).unwrap();
    let mut builder = SceneBuilder::new(canvas);
    let a = builder.draw_box(Node::new(Rect::new(0.0, 0.0, 2.0, 1.0), "A", color("#E3F2FD")));
    let b = builder.draw_box(Node::new(Rect::new(5.0, 0.0, 2.0, 1.0), "B", color("#E3F2FD")));
    builder.draw_arrow(Edge::new(
        Endpoint::side(a, Side::Right),
        Endpoint::side(b, Side::Left),
    ));
    builder.build().unwrap()
}

/// RGB of the raster pixel under a logical point
fn pixel_at(builder: &DiagramBuilder, scene: &Scene, point: Point) -> (u8, u8, u8) {
    let rendered = builder.render_svg(scene).unwrap();
    let png = builder.render_png(scene).unwrap();
    let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();

    let output = scene.canvas().to_output(point);
    let scale = DPI / 72.0;
    let x = ((output.x() - rendered.view_box().min_x()) * scale) as u32;
    let y = ((output.y() - rendered.view_box().min_y()) * scale) as u32;
    let pixel = pixmap.pixel(x, y).unwrap();
    (pixel.red(), pixel.green(), pixel.blue())
}

#[test]
fn test_two_nodes_one_edge() {
    let scene = two_node_scene();
    let builder = builder();
    let rendered = builder.render_svg(&scene).unwrap();

    let logical = rendered.logical_content_bounds();
    assert!(logical.min_x() <= 0.0 && logical.max_x() >= 7.0);
    assert!(logical.min_y() <= 0.0 && logical.max_y() >= 1.0);

    let svg = rendered.svg();
    assert_eq!(svg.matches("<rect").count(), 3, "background and two boxes");
    assert!(svg.contains("marker-end"));

    let edge = scene.edges().next().unwrap();
    assert_approx_eq!(f32, edge.end().x(), 5.0);

    // The shaft is drawn in black just before the arrowhead
    let (r, g, b) = pixel_at(&builder, &scene, Point::new(4.5, 0.5));
    assert!(r < 100 && g < 100 && b < 100, "expected a dark pixel, got {r},{g},{b}");

    // Middle of the arrowhead's upper arm: 2.4 pt behind the tip at x = 5 and
    // 1.2 pt off the shaft axis, clear of the 1.5 pt shaft
    let (r, g, b) = pixel_at(&builder, &scene, Point::new(5.0 - 2.4 / 72.0, 0.5 + 1.2 / 72.0));
    assert!(r < 100 && g < 100 && b < 100, "expected the arrowhead, got {r},{g},{b}");

    // Past the tip the box fill shows through
    assert_eq!(pixel_at(&builder, &scene, Point::new(5.1, 0.5)), (0xE3, 0xF2, 0xFD));
}

/// Leftmost and rightmost pixel columns that differ from the white background
fn ink_columns(pixmap: &tiny_skia::Pixmap) -> Option<(u32, u32)> {
    let inked = |x: u32| {
        (0..pixmap.height()).any(|y| {
            let pixel = pixmap.pixel(x, y).unwrap();
            (pixel.red(), pixel.green(), pixel.blue()) != (255, 255, 255)
        })
    };
    let first = (0..pixmap.width()).find(|&x| inked(x))?;
    let last = (0..pixmap.width()).rev().find(|&x| inked(x))?;
    Some((first, last))
}

#[test]
fn test_trim_follows_configured_font() {
    let canvas = Canvas::new(4.0, 1.0, (0.0, 4.0), (0.0, 1.0)).unwrap();
    let mut scene = SceneBuilder::new(canvas);
    scene.draw_label(
        Label::new(Point::new(2.0, 0.5), "iiiiiiiiiiii")
            .with_style(TextDefinition::new().with_font_size(20.0)),
    );
    let scene = scene.build().unwrap();

    let builder = DiagramBuilder::new(AppConfig::new(
        RenderConfig::new(72.0, 7.2).with_font_family("DejaVu Sans Mono"),
        PaletteConfig::new(),
    ));
    let png = builder.render_png(&scene).unwrap();
    let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();

    let (first, last) = ink_columns(&pixmap).expect("label was not drawn");
    let left = first;
    let right = pixmap.width() - 1 - last;
    assert!(left >= 5 && right >= 5, "margins {left} and {right} below the trim");
    assert!(left.abs_diff(right) <= 2, "margins {left} and {right} are lopsided");
}

#[test]
fn test_group_under_opaque_nodes() {
    let canvas = Canvas::new(6.0, 3.0, (0.0, 6.0), (0.0, 3.0)).unwrap();
    let mut scene = SceneBuilder::new(canvas);
    scene.draw_group(
        Group::new(Rect::new(0.5, 0.5, 5.0, 2.0), "Group")
            .with_fill(color("#00FF00"))
            .with_z(1),
    );
    scene.draw_box(Node::new(Rect::new(1.0, 1.0, 1.5, 1.0), "", color("#FF0000")).with_z(10));
    scene.draw_box(Node::new(Rect::new(3.5, 1.0, 1.5, 1.0), "", color("#0000FF")).with_z(10));
    let scene = scene.build().unwrap();

    let builder = builder();
    assert_eq!(pixel_at(&builder, &scene, Point::new(1.75, 1.5)), (255, 0, 0));
    assert_eq!(pixel_at(&builder, &scene, Point::new(4.25, 1.5)), (0, 0, 255));
    assert_eq!(pixel_at(&builder, &scene, Point::new(3.0, 0.8)), (0, 255, 0));
}

#[test]
fn test_export_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("architecture.png");
    let builder = DiagramBuilder::new(AppConfig::default().with_dpi(72.0));
    let scene = builder.compose().unwrap();

    builder.export_png(&scene, &path).unwrap();
    let first = std::fs::read(&path).unwrap();
    builder.export_png(&scene, &path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_png_matches_trimmed_bounds() {
    let builder = DiagramBuilder::new(AppConfig::default().with_dpi(72.0));
    let scene = builder.compose().unwrap();
    let rendered = builder.render_svg(&scene).unwrap();

    let content = rendered.content_bounds();
    let view_box = rendered.view_box();
    assert_approx_eq!(f32, content.min_x() - view_box.min_x(), 7.2, epsilon = 1e-3);
    assert_approx_eq!(f32, view_box.max_y() - content.max_y(), 7.2, epsilon = 1e-3);

    // Every box outline lies within the content bounds
    for (_, node) in scene.nodes() {
        let outline = scene.canvas().rect_to_output(node.rect().inflate(node.pad()));
        assert!(content.contains(&outline), "{} escapes the trim", node.title());
    }

    let png = builder.render_png(&scene).unwrap();
    let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), rendered.pixel_size(72.0));
}

#[test]
fn test_edge_endpoints_on_node_outlines() {
    let scene = DiagramBuilder::default().compose().unwrap();
    for placed in scene.edges() {
        let edge = placed.edge();
        for (endpoint, point) in [
            (edge.source(), placed.start()),
            (edge.target(), placed.end()),
        ] {
            if let Some(id) = endpoint.node() {
                let rect = scene.node(id).unwrap().rect();
                assert!(rect.distance_to_outline(point) < 1e-4);
                assert!(point.distance(rect.center()) > 0.1);
            }
        }
    }
}

#[test]
fn test_export_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs").join("images").join("architecture.png");
    let builder = DiagramBuilder::default();
    let scene = builder.compose().unwrap();

    match builder.export_png(&scene, &path) {
        Err(ArchdrawError::Export(export::Error::MissingDirectory(missing))) => {
            assert_eq!(missing, dir.path().join("docs").join("images"));
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_export_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("architecture.svg");
    let builder = DiagramBuilder::default();
    let scene = builder.compose().unwrap();

    builder.export_svg(&scene, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, builder.render_svg(&scene).unwrap().into_string());
}
