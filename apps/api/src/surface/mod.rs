// Visual surface: node tree, document with off-screen mounting, box layout, SVG output.
// Layout and SVG emission are CPU-bound; run them inside tokio::task::spawn_blocking.

pub mod document;
pub mod layout;
pub mod metrics;
pub mod node;
pub mod svg;

pub use document::{Document, OffscreenMount};
pub use node::{Node, Tag};

/// Lays out `node` at `width` and returns the SVG markup.
pub fn render_svg(node: &Node, width: f32) -> String {
    svg::to_svg(&layout::layout(node, width))
}
