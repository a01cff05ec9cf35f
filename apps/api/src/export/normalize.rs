//! Style normalization applied to the export clone (never to the live surface).

use crate::export::ExportSettings;
use crate::surface::node::{Align, Color, Display, Edges, Node, ObjectFit, Radius, Tag};
use crate::templates::sections::PROFILE_ALT;

pub const SECTION_MARGIN_BOTTOM: f32 = 20.0;
pub const SKILL_ITEM_SPACING: f32 = 8.0;
pub const PHOTO_SIZE: f32 = 100.0;

/// Fixes the quirks the rasterizer would otherwise pick up from the preview styling:
/// fixed width and padding on an opaque white root, explicit section and skill spacing,
/// and a circular cover-fit profile photo.
pub fn normalize_surface(root: &mut Node, settings: &ExportSettings) {
    root.style.width = Some(settings.surface_width);
    root.style.padding = Edges::all(settings.padding);
    root.style.background = Some(Color::WHITE);

    root.walk_mut(&mut |node| {
        if node.tag == Tag::Section {
            node.style.margin_bottom = SECTION_MARGIN_BOTTOM;
        }
        if node.has_class("skill-item") {
            node.style.margin_bottom = SKILL_ITEM_SPACING;
            node.style.gap = SKILL_ITEM_SPACING;
            node.style.display = Display::Flex;
            node.style.align_items = Align::Center;
        }
        if node.tag == Tag::Img && node.attr_value("alt") == Some(PROFILE_ALT) {
            node.style.width = Some(PHOTO_SIZE);
            node.style.height = Some(PHOTO_SIZE);
            node.style.object_fit = ObjectFit::Cover;
            node.style.radius = Radius::Full;
        }
    });
}
