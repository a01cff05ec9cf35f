//! Modern: accent rule beside the name, photo on the left, chip-style skills.

use crate::models::record::ResumeRecord;
use crate::surface::metrics::FontFamily;
use crate::surface::node::{Align, Color, Display, Edges, FontWeight, Node, Tag, TextAlign};
use crate::templates::sections::{self, Theme};

const ACCENT: Color = Color::rgb(0x25, 0x63, 0xeb);

pub fn theme() -> Theme {
    Theme {
        family: FontFamily::Sans,
        accent: ACCENT,
        text: Color::rgb(0x1f, 0x29, 0x37),
        muted: Color::rgb(0x4b, 0x55, 0x63),
        heading_size: 18.0,
        heading_weight: FontWeight::Bold,
        heading_rule: false,
        heading_align: TextAlign::Left,
        chip_background: Some(Color::rgb(0xdb, 0xea, 0xfe)),
    }
}

pub fn render(record: &ResumeRecord) -> Node {
    let theme = theme();
    let mut identity = Node::new(Tag::Div).style(|s| {
        s.border_left = Some((4.0, ACCENT));
        s.padding.left = 16.0;
    });
    if let Some(name) = sections::non_blank(&record.personal_info.full_name) {
        identity = identity.child(Node::text(Tag::H1, name).style(|s| s.font_size = Some(32.0)));
    }
    if let Some(headline) = sections::headline(record) {
        let muted = theme.muted;
        identity = identity.child(Node::text(Tag::P, headline).style(|s| {
            s.font_size = Some(18.0);
            s.color = Some(muted);
            s.margin_top = 4.0;
        }));
    }
    let contacts = sections::contact_items(record);
    if !contacts.is_empty() {
        let muted = theme.muted;
        identity = identity.child(
            Node::new(Tag::Div)
                .style(|s| {
                    s.display = Display::Flex;
                    s.wrap = true;
                    s.gap = 12.0;
                    s.margin_top = 8.0;
                    s.color = Some(muted);
                    s.font_size = Some(12.0);
                })
                .children(contacts.into_iter().map(|c| Node::text(Tag::Span, c))),
        );
    }

    let mut header = Node::new(Tag::Header).style(|s| {
        s.display = Display::Flex;
        s.align_items = Align::Center;
        s.gap = 24.0;
        s.margin_bottom = 28.0;
    });
    if let Some(photo) = sections::profile_photo(record, 96.0) {
        header = header.child(photo);
    }
    if !identity.is_empty() {
        header = header.child(identity);
    }

    let (family, text) = (theme.family, theme.text);
    let mut root = Node::new(Tag::Div).class("template-modern").style(|s| {
        s.background = Some(Color::WHITE);
        s.padding = Edges::all(32.0);
        s.font_family = Some(family);
        s.color = Some(text);
    });
    if !header.is_empty() {
        root = root.child(header);
    }
    root.children(sections::body_sections(record, &theme))
}
