//! SVG rendering of scenes.
//!
//! [`Svg`] turns every draw command into its drawable, merges their layered
//! output, and sizes the document to the union of the drawn bounds plus a
//! trim padding. SVG user units are output points.

use std::{fmt, fs, path::Path};

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use archdraw_core::{
    canvas::Canvas,
    color::Color,
    draw::{
        Arrow, ArrowDrawer, ArrowPath, DEFAULT_FONT_FAMILY, Drawable, Frame, LabeledBox,
        LayeredOutput, PlacedText, RoundedBox, Text, TextDefinition,
    },
    geometry::{Bounds, Insets, Point},
    scene::{DrawCommand, Scene},
};

use super::{Error, Exporter, ensure_parent_dir};
use crate::config::DEFAULT_TRIM_PADDING;

/// A rendered SVG document together with its geometry.
#[derive(Debug, Clone)]
pub struct RenderedDiagram {
    svg: String,
    canvas: Canvas,
    content_bounds: Bounds,
    view_box: Bounds,
}

impl RenderedDiagram {
    /// The SVG document text
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn into_string(self) -> String {
        self.svg
    }

    /// Union of all drawn element bounds in output points
    pub fn content_bounds(&self) -> Bounds {
        self.content_bounds
    }

    /// The same union in logical canvas coordinates
    pub fn logical_content_bounds(&self) -> Bounds {
        self.canvas.bounds_to_logical(self.content_bounds)
    }

    /// The document viewBox: content bounds grown by the trim padding
    pub fn view_box(&self) -> Bounds {
        self.view_box
    }

    /// Document width in points
    pub fn width(&self) -> f32 {
        self.view_box.width()
    }

    /// Document height in points
    pub fn height(&self) -> f32 {
        self.view_box.height()
    }

    /// Pixel dimensions when rasterized at `dpi`
    pub fn pixel_size(&self, dpi: f32) -> (u32, u32) {
        let scale = dpi / archdraw_core::canvas::POINTS_PER_INCH;
        (
            (self.width() * scale).ceil().max(1.0) as u32,
            (self.height() * scale).ceil().max(1.0) as u32,
        )
    }
}

impl fmt::Display for RenderedDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.svg)
    }
}

/// Builder for [`Svg`].
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    background: Option<Color>,
    font_family: String,
    trim_padding: f32,
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self {
            background: None,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            trim_padding: DEFAULT_TRIM_PADDING,
        }
    }
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints a background rectangle under the whole document
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_font_family(mut self, family: &str) -> Self {
        self.font_family = family.to_string();
        self
    }

    /// Padding around the content bounds in points
    pub fn with_trim_padding(mut self, padding: f32) -> Self {
        self.trim_padding = padding;
        self
    }

    pub fn build(self) -> Svg {
        Svg {
            background: self.background,
            font_family: self.font_family,
            trim_padding: self.trim_padding,
        }
    }
}

/// SVG renderer and exporter for scenes.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    font_family: String,
    trim_padding: f32,
}

impl Svg {
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Renders the scene to a trimmed SVG document.
    pub fn render_scene(&self, scene: &Scene) -> RenderedDiagram {
        let canvas = scene.canvas();
        let mut arrow_drawer = ArrowDrawer::new();
        let mut output = LayeredOutput::new();
        let mut content: Option<Bounds> = None;

        for command in scene.commands() {
            let (layers, bounds) = self.render_command(command, canvas, &mut arrow_drawer);
            output.merge(layers);
            if let Some(bounds) = bounds {
                content = Some(content.map_or(bounds, |acc| acc.merge(&bounds)));
            }
        }

        // An empty scene keeps the whole figure
        let content_bounds = content.unwrap_or_else(|| {
            Bounds::new_from_top_left(Point::new(0.0, 0.0), canvas.output_size())
        });
        let view_box = content_bounds.add_padding(Insets::uniform(self.trim_padding));
        debug!(
            min_x = view_box.min_x(),
            min_y = view_box.min_y(),
            width = view_box.width(),
            height = view_box.height();
            "Calculated SVG viewBox"
        );

        let document = self.create_document(view_box, arrow_drawer, output);

        RenderedDiagram {
            svg: document.to_string(),
            canvas: *canvas,
            content_bounds,
            view_box,
        }
    }

    fn create_document(
        &self,
        view_box: Bounds,
        arrow_drawer: ArrowDrawer,
        output: LayeredOutput,
    ) -> Document {
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view_box.min_x(),
                    view_box.min_y(),
                    view_box.width(),
                    view_box.height()
                ),
            )
            .set("width", view_box.width())
            .set("height", view_box.height())
            .set("font-family", self.font_family.as_str());

        if let Some(background) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", view_box.min_x())
                .set("y", view_box.min_y())
                .set("width", view_box.width())
                .set("height", view_box.height())
                .set("fill", &background)
                .set("fill-opacity", background.alpha());
            doc = doc.add(rect);
        }

        if let Some(defs) = arrow_drawer.draw_marker_definitions() {
            doc = doc.add(defs);
        }

        for group in output.render() {
            doc = doc.add(group);
        }

        doc
    }

    /// Fills in the document font for styles that do not name one, so text
    /// is measured with the family it is drawn with.
    fn resolve_style(&self, style: &TextDefinition) -> TextDefinition {
        match style.font_family() {
            Some(_) => style.clone(),
            None => style.clone().with_font_family(&self.font_family),
        }
    }

    /// Renders one command, returning its layers and output-space bounds
    fn render_command(
        &self,
        command: &DrawCommand,
        canvas: &Canvas,
        arrow_drawer: &mut ArrowDrawer,
    ) -> (LayeredOutput, Option<Bounds>) {
        match command {
            DrawCommand::Node { node, .. } => {
                let shape = RoundedBox::new(node.rect(), node.border().clone(), node.z())
                    .with_fill(node.fill())
                    .with_pad(node.pad());
                let title_style = self.resolve_style(node.title_style());
                let subtext_style = self.resolve_style(node.subtext_style());
                let mut labeled = LabeledBox::new(shape, Text::new(&title_style, node.title()));
                if let Some(subtext) = node.subtext() {
                    labeled = labeled.with_subtext(Text::new(&subtext_style, subtext));
                }
                (labeled.render_to_layers(canvas), labeled.bounds(canvas))
            }
            DrawCommand::Group(group) => {
                let mut shape = RoundedBox::new(group.rect(), group.border().clone(), group.z())
                    .with_pad(group.pad());
                if let Some(fill) = group.fill() {
                    shape = shape.with_fill(fill);
                }
                let caption_style = self.resolve_style(group.caption_style());
                let frame = Frame::new(
                    shape,
                    Text::new(&caption_style, group.caption()),
                    group.caption_align(),
                );
                (frame.render_to_layers(canvas), frame.bounds(canvas))
            }
            DrawCommand::Edge(placed) => {
                let edge = placed.edge();
                let label_style = self.resolve_style(edge.label_style());
                let mut arrow = Arrow::new(
                    placed.start(),
                    placed.end(),
                    edge.stroke().clone(),
                    edge.z(),
                )
                .with_path(ArrowPath::from_curvature(edge.curvature()));
                if let Some(label) = edge.label() {
                    arrow = arrow.with_label(
                        Text::new(&label_style, label),
                        edge.label_position(),
                    );
                }
                (arrow_drawer.draw_arrow(&arrow, canvas), arrow.bounds(canvas))
            }
            DrawCommand::Label(label) => {
                let style = self.resolve_style(label.style());
                let placed = PlacedText::new(
                    Text::new(&style, label.text()),
                    label.position(),
                    label.z(),
                )
                .with_anchor(label.anchor())
                .with_valign(label.valign());
                (placed.render_to_layers(canvas), placed.bounds(canvas))
            }
        }
    }
}

impl Exporter for Svg {
    fn export_scene(&self, scene: &Scene, path: &Path) -> Result<(), Error> {
        ensure_parent_dir(path)?;
        let rendered = self.render_scene(scene);
        info!(path:? = path; "Writing SVG file");
        fs::write(path, rendered.svg())?;
        Ok(())
    }
}
