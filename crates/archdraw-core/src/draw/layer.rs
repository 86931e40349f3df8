//! Z-ordered rendering for SVG output.
//!
//! Every drawable emits its SVG nodes tagged with an integer z-order. When the
//! output is rendered the nodes are stably sorted by z, so equal z-orders keep
//! the order in which they were added, and each run of equal z becomes one
//! `<g data-z="...">` group.
//!
//! # Example
//!
//! ```
//! # use archdraw_core::draw::{Layer, LayeredOutput};
//! # use svg::node::element::Rectangle;
//! let mut output = LayeredOutput::new();
//!
//! output.add(Layer::Connector.z(), Box::new(Rectangle::new()));
//! output.add(Layer::Frame.z(), Box::new(Rectangle::new()));
//!
//! // Frame group first, connector group second
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Z-order value. Higher values draw on top of lower ones.
pub type ZOrder = i32;

/// Conventional z-orders for the kinds of scene elements.
///
/// Scene elements accept any integer z-order; these are the defaults used
/// when a caller does not pick one, ordered so that frames sit beneath
/// shapes, shapes beneath connectors and connectors beneath free labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Grouping frames
    Frame,
    /// Boxes
    Shape,
    /// Arrows
    Connector,
    /// Free-standing text
    Label,
}

impl Layer {
    /// Returns the default z-order of this layer.
    pub fn z(self) -> ZOrder {
        match self {
            Self::Frame => 1,
            Self::Shape => 10,
            Self::Connector => 20,
            Self::Label => 30,
        }
    }
}

/// SVG nodes tagged with their z-order.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(ZOrder, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node at z-order `z`.
    ///
    /// Nodes with the same z-order render in the order they are added.
    pub fn add(&mut self, z: ZOrder, node: SvgNode) {
        self.items.push((z, node));
    }

    /// Appends all nodes of `other`, after the nodes already present.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if no node has been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The distinct z-orders present, ascending.
    pub fn z_orders(&self) -> Vec<ZOrder> {
        let mut zs: Vec<ZOrder> = self.items.iter().map(|(z, _)| *z).collect();
        zs.sort_unstable();
        zs.dedup();
        zs
    }

    /// Renders to one SVG group per distinct z-order, consuming the output.
    ///
    /// Groups are returned bottom to top and carry a `data-z` attribute.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable: equal z keeps insertion order
        self.items.sort_by_key(|(z, _)| *z);

        let mut result = Vec::new();
        let mut current_z = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-z", current_z);

        for (z, node) in self.items {
            if z != current_z {
                result.push(Box::new(current_group) as SvgNode);

                current_z = z;
                current_group = svg_element::Group::new().set("data-z", z);
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
