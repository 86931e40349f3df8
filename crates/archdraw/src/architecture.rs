//! The documentation architecture diagram.
//!
//! [`compose`] declares the whole picture: the browser user, the build phase
//! that bundles templates into the worker, the platform frame with its edge
//! network, static asset service and worker, and the durable-object frame
//! holding the Counter, BBS and Diary objects with their embedded SQLite
//! stores. Colors come from the [`Palette`] by category name.
//!
//! Frames sit at z 1 and 5, boxes at 10 to 15, free labels at 11 and 16 and
//! the request-flow arrows at 20.

use log::info;

use archdraw_core::{
    canvas::Canvas,
    color::Color,
    draw::{
        CaptionAlign, FontWeight, StrokeDefinition, StrokeStyle, TextAnchor, TextDefinition,
        VerticalAlign,
    },
    error::GeometryError,
    geometry::{Point, Rect, Side},
    palette::Palette,
    scene::{Edge, Endpoint, Group, Label, Node, NodeId, Scene, SceneBuilder},
};

use crate::ArchdrawError;

/// Figure size in inches.
pub const FIGURE_SIZE: (f32, f32) = (13.0, 8.0);

const BORDER_WIDTH: f32 = 1.5;
const ARROW_WIDTH: f32 = 1.5;
const BUILD_ARROW_WIDTH: f32 = 1.2;
const FRAME_BORDER_WIDTH: f32 = 1.0;

const PLATFORM_Z: i32 = 1;
const DO_FRAME_Z: i32 = 5;
const BOX_Z: i32 = 10;
const WORKER_MODULE_Z: i32 = 12;
const SQLITE_Z: i32 = 15;
const DO_LABEL_Z: i32 = 16;
const FLOW_Z: i32 = 20;
/// The build arrow passes beneath the platform's boxes.
const BUILD_FLOW_Z: i32 = 3;

/// The canvas of the architecture diagram: 13 x 8 inches, one unit per inch.
pub fn canvas() -> Result<Canvas, GeometryError> {
    let (width, height) = FIGURE_SIZE;
    Canvas::new(width, height, (0.0, width), (0.0, height))
}

fn style(size: f32, weight: FontWeight, color: Color) -> TextDefinition {
    TextDefinition::new()
        .with_font_size(size)
        .with_weight(weight)
        .with_color(color)
}

/// Shared styling of the boxes: edge-colored border and subtext color.
struct Boxes<'a> {
    palette: &'a Palette,
    border: StrokeDefinition,
    subtext: TextDefinition,
}

impl<'a> Boxes<'a> {
    fn new(palette: &'a Palette) -> Result<Self, ArchdrawError> {
        Ok(Self {
            palette,
            border: StrokeDefinition::solid(palette.get("edge")?, BORDER_WIDTH),
            subtext: style(9.0, FontWeight::Normal, palette.get("subtext")?),
        })
    }

    /// A box with an 11 pt bold black title at the default z-order
    fn node(&self, rect: Rect, title: &str, fill: &str) -> Result<Node, ArchdrawError> {
        Ok(Node::new(rect, title, self.palette.get(fill)?)
            .with_border(self.border.clone())
            .with_title_style(style(11.0, FontWeight::Bold, self.palette.get("text")?))
            .with_subtext_style(self.subtext.clone())
            .with_z(BOX_Z))
    }

    fn title(
        &self,
        size: f32,
        weight: FontWeight,
        color: &str,
    ) -> Result<TextDefinition, ArchdrawError> {
        Ok(style(size, weight, self.palette.get(color)?))
    }
}

/// Composes the architecture diagram from `palette`.
///
/// # Errors
///
/// Returns [`ArchdrawError::Palette`] if `palette` lacks one of the
/// categories listed in [`archdraw_core::palette::ARCHITECTURE_COLORS`], and
/// [`ArchdrawError::Geometry`] if the declared scene violates the canvas
/// contract.
pub fn compose(palette: &Palette) -> Result<Scene, ArchdrawError> {
    info!(colors = palette.len(); "Composing architecture diagram");

    let mut builder = SceneBuilder::new(canvas()?);
    let boxes = Boxes::new(palette)?;

    let user = builder.draw_box(
        boxes
            .node(Rect::new(0.5, 3.5, 1.8, 1.0), "User", "user")?
            .with_subtext("(Browser)")
            .with_title_style(boxes.title(11.0, FontWeight::Bold, "user_text")?),
    );

    compose_build_phase(&mut builder, &boxes)?;

    builder.draw_group(
        Group::new(Rect::new(3.0, 0.5, 9.5, 7.0), "Cloudflare Platform")
            .with_fill(palette.get("cf_bg")?)
            .with_border(StrokeDefinition::dashed(
                palette.get("platform_border")?,
                FRAME_BORDER_WIDTH,
            ))
            .with_pad(0.2)
            .with_caption_style(boxes.title(10.0, FontWeight::Bold, "caption")?)
            .with_caption_align(CaptionAlign::Start)
            .with_z(PLATFORM_Z),
    );

    let edge = builder.draw_box(
        boxes
            .node(Rect::new(3.5, 2.5, 1.5, 3.0), "Edge\nNetwork", "routing")?
            .with_subtext("(Routing)")
            .with_title_style(boxes.title(10.0, FontWeight::Bold, "text")?),
    );

    let assets = builder.draw_box(
        boxes
            .node(Rect::new(5.8, 5.5, 2.5, 1.0), "Static Assets", "static")?
            .with_subtext("(CDN / Assets)")
            .with_title_style(boxes.title(11.0, FontWeight::Bold, "static_text")?),
    );

    let worker = compose_worker(&mut builder, &boxes)?;
    let objects = compose_durable_objects(&mut builder, &boxes)?;

    let flow = |color: &str| -> Result<StrokeDefinition, ArchdrawError> {
        Ok(StrokeDefinition::solid(palette.get(color)?, ARROW_WIDTH))
    };
    let flow_label = |color: &str| boxes.title(9.0, FontWeight::Normal, color);

    builder.draw_arrow(
        Edge::new(Endpoint::side(user, Side::Right), Endpoint::side(edge, Side::Left))
            .with_stroke(flow("edge")?)
            .with_z(FLOW_Z),
    );
    builder.draw_arrow(
        Edge::new(
            Endpoint::side_at(edge, Side::Right, 4.5),
            Endpoint::side(assets, Side::Left),
        )
        .with_stroke(flow("static_text")?)
        .with_curvature(-0.1)
        .with_label("Static")
        .with_label_style(flow_label("static_text")?)
        .with_z(FLOW_Z),
    );
    builder.draw_arrow(
        Edge::new(
            Endpoint::side_at(edge, Side::Right, 3.5),
            Endpoint::side_at(worker, Side::Left, 3.5),
        )
        .with_stroke(flow("worker_text")?)
        .with_label("Dynamic")
        .with_label_style(flow_label("worker_text")?)
        .with_z(FLOW_Z),
    );

    for (object, along, curvature) in [
        (objects[0], 4.0, 0.1),
        (objects[1], 3.5, 0.1),
        (objects[2], 3.0, -0.1),
    ] {
        builder.draw_arrow(
            Edge::new(
                Endpoint::side_at(worker, Side::Right, along),
                Endpoint::side(object, Side::Left),
            )
            .with_stroke(flow("edge")?)
            .with_curvature(curvature)
            .with_z(FLOW_Z),
        );
    }

    let scene = builder.build()?;
    info!(commands = scene.commands().len(); "Architecture diagram composed");
    Ok(scene)
}

/// The "Build Phase" caption, the templates box and the bundle arrow.
fn compose_build_phase(builder: &mut SceneBuilder, boxes: &Boxes) -> Result<(), ArchdrawError> {
    builder.draw_label(
        Label::new(Point::new(1.4, 7.5), "Build Phase")
            .with_style(boxes.title(10.0, FontWeight::Bold, "caption")?)
            .with_anchor(TextAnchor::Middle)
            .with_valign(VerticalAlign::Baseline),
    );

    builder.draw_box(
        boxes
            .node(Rect::new(0.5, 6.2, 1.8, 0.8), "Templates", "build")?
            .with_border(boxes.border.clone().with_style(StrokeStyle::Dashed))
            .with_title_style(boxes.title(9.0, FontWeight::Normal, "text")?),
    );

    builder.draw_arrow(
        Edge::new(Endpoint::point(1.4, 6.2), Endpoint::point(5.5, 5.0))
            .with_stroke(StrokeDefinition::solid(
                boxes.palette.get("build_arrow")?,
                BUILD_ARROW_WIDTH,
            ))
            .with_curvature(0.2)
            .with_label("Build & Bundle")
            .with_label_style(boxes.title(8.0, FontWeight::Normal, "build_label")?)
            .with_z(BUILD_FLOW_Z),
    );

    Ok(())
}

/// The worker box, its overlaid title and its three internal modules.
fn compose_worker(builder: &mut SceneBuilder, boxes: &Boxes) -> Result<NodeId, ArchdrawError> {
    let worker = builder.draw_box(boxes.node(Rect::new(5.8, 1.5, 2.5, 3.2), "", "worker")?);
    builder.draw_label(
        Label::new(Point::new(7.05, 4.4), "Worker (Hono)")
            .with_style(boxes.title(11.0, FontWeight::Bold, "worker_text")?)
            .with_z(BOX_Z + 1),
    );

    let module_title = boxes.title(9.0, FontWeight::Normal, "text")?;
    for (y, title, fill) in [
        (3.5, "Logic / Auth", "worker_logic"),
        (2.7, "Templates (JS)", "worker_module"),
        (1.9, "Digits (SVG)", "worker_module"),
    ] {
        builder.draw_box(
            boxes
                .node(Rect::new(6.0, y, 2.1, 0.6), title, fill)?
                .with_title_style(module_title.clone())
                .with_z(WORKER_MODULE_Z),
        );
    }

    Ok(worker)
}

/// The durable-objects frame and its three objects, each with a SQLite store.
///
/// Returns the object boxes top to bottom.
fn compose_durable_objects(
    builder: &mut SceneBuilder,
    boxes: &Boxes,
) -> Result<[NodeId; 3], ArchdrawError> {
    builder.draw_group(
        Group::new(Rect::new(9.0, 1.0, 3.2, 6.0), "Durable Objects")
            .with_border(StrokeDefinition::dotted(
                boxes.palette.get("edge")?,
                FRAME_BORDER_WIDTH,
            ))
            .with_caption_style(boxes.title(10.0, FontWeight::Bold, "do_text")?)
            .with_caption_align(CaptionAlign::Center)
            .with_z(DO_FRAME_Z),
    );

    let name_style = boxes.title(10.0, FontWeight::Bold, "do_text")?;
    let sqlite_style = boxes.title(8.0, FontWeight::Normal, "db_text")?;

    let mut objects = Vec::with_capacity(3);
    for (y, name) in [(4.9, "Counter"), (3.2, "BBS"), (1.5, "Diary")] {
        let object = builder.draw_box(boxes.node(Rect::new(9.3, y, 2.6, 1.1), "", "do")?);
        builder.draw_label(
            Label::new(Point::new(9.9, y + 0.55), name)
                .with_style(name_style.clone())
                .with_z(DO_LABEL_Z),
        );
        builder.draw_box(
            boxes
                .node(Rect::new(10.8, y + 0.1, 0.8, 0.9), "SQLite", "db")?
                .with_title_style(sqlite_style.clone())
                .with_z(SQLITE_Z),
        );
        objects.push(object);
    }

    Ok([objects[0], objects[1], objects[2]])
}
