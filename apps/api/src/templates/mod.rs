// Record → surface renderers. Pure functions of the record; no I/O.

pub mod classic;
pub mod minimal;
pub mod modern;
pub mod sections;

use crate::models::record::{ResumeRecord, Template};
use crate::surface::node::{Color, Edges, FontWeight, Node, Tag};
use crate::surface::Document;

/// Element id of the exportable preview surface.
pub const PREVIEW_SURFACE_ID: &str = "cv-preview";

/// Renders the record with its selected template.
pub fn render_template(record: &ResumeRecord) -> Node {
    match record.template {
        Template::Modern => modern::render(record),
        Template::Classic => classic::render(record),
        Template::Minimal => minimal::render(record),
    }
}

/// The full preview page: an application bar followed by the addressable surface.
pub fn render_preview(record: &ResumeRecord) -> Document {
    let app_bar = Node::new(Tag::Header)
        .id("app-bar")
        .style(|s| {
            s.padding = Edges::xy(24.0, 12.0);
            s.background = Some(Color::rgb(0xf3, 0xf4, 0xf6));
        })
        .child(Node::text(Tag::Span, "CV Builder").style(|s| s.font_weight = Some(FontWeight::Bold)));

    let surface = Node::new(Tag::Div)
        .id(PREVIEW_SURFACE_ID)
        .child(render_template(record));

    Document::new(vec![app_bar, surface])
}
