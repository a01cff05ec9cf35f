//! Classic: centred serif header, contact line separated by bullets, ruled headings.

use crate::models::record::ResumeRecord;
use crate::surface::metrics::FontFamily;
use crate::surface::node::{Color, Display, Edges, FontWeight, Justify, Node, Tag, TextAlign};
use crate::templates::sections::{self, Theme};

pub fn theme() -> Theme {
    Theme {
        family: FontFamily::Serif,
        accent: Color::rgb(0x11, 0x18, 0x27),
        text: Color::rgb(0x11, 0x18, 0x27),
        muted: Color::rgb(0x4b, 0x55, 0x63),
        heading_size: 17.0,
        heading_weight: FontWeight::Bold,
        heading_rule: true,
        heading_align: TextAlign::Left,
        chip_background: None,
    }
}

pub fn render(record: &ResumeRecord) -> Node {
    let theme = theme();
    let mut header = Node::new(Tag::Header).style(|s| {
        s.text_align = Some(TextAlign::Center);
        s.margin_bottom = 32.0;
    });

    if let Some(photo) = sections::profile_photo(record, 88.0) {
        header = header.child(photo.style(|s| s.margin_bottom = 12.0));
    }
    if let Some(name) = sections::non_blank(&record.personal_info.full_name) {
        header = header.child(Node::text(Tag::H1, name).style(|s| {
            s.font_size = Some(34.0);
            s.font_weight = Some(FontWeight::Normal);
            s.margin_bottom = 6.0;
        }));
    }
    if let Some(headline) = sections::headline(record) {
        let color = Color::rgb(0x37, 0x41, 0x51);
        header = header.child(Node::text(Tag::P, headline).style(|s| {
            s.font_size = Some(18.0);
            s.color = Some(color);
        }));
    }

    let contacts = sections::contact_items(record);
    if !contacts.is_empty() {
        let muted = theme.muted;
        let mut line = Node::new(Tag::Div).style(|s| {
            s.display = Display::Flex;
            s.justify = Justify::Center;
            s.wrap = true;
            s.gap = 10.0;
            s.margin_top = 8.0;
            s.color = Some(muted);
        });
        for (i, contact) in contacts.into_iter().enumerate() {
            if i > 0 {
                line = line.child(Node::text(Tag::Span, "•"));
            }
            line = line.child(Node::text(Tag::Span, contact));
        }
        header = header.child(line);
    }

    let (family, text) = (theme.family, theme.text);
    let mut root = Node::new(Tag::Div).class("template-classic").style(|s| {
        s.background = Some(Color::WHITE);
        s.padding = Edges::all(32.0);
        s.font_family = Some(family);
        s.color = Some(text);
        s.font_size = Some(15.0);
    });
    if !header.is_empty() {
        root = root.child(header);
    }
    root.children(sections::body_sections(record, &theme))
}
