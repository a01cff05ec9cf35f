use crate::models::record::ResumeRecord;
use crate::surface::metrics::FontFamily;
use crate::surface::node::{Color, Edges, FontWeight, Node, Tag, TextAlign};
use crate::templates::sections::{self, Theme};

pub fn theme() -> Theme {
    Theme {
        family: FontFamily::Sans,
        accent: Color::rgb(0x11, 0x18, 0x27),
        text: Color::rgb(0x37, 0x41, 0x51),
        muted: Color::rgb(0x6b, 0x72, 0x80),
        heading_size: 13.0,
        heading_weight: FontWeight::Bold,
        heading_rule: false,
        heading_align: TextAlign::Left,
        chip_background: None,
    }
}

pub fn render(record: &ResumeRecord) -> Node {
    let theme = theme();
    let mut header = Node::new(Tag::Header).style(|s| s.margin_bottom = 32.0);

    if let Some(name) = sections::non_blank(&record.personal_info.full_name) {
        header = header.child(Node::text(Tag::H1, name).style(|s| {
            s.font_size = Some(30.0);
            s.font_weight = Some(FontWeight::Light);
            s.color = Some(Color::rgb(0x11, 0x18, 0x27));
        }));
    }
    if let Some(headline) = sections::headline(record) {
        let muted = theme.muted;
        header = header.child(Node::text(Tag::P, headline).style(|s| {
            s.font_size = Some(17.0);
            s.color = Some(muted);
            s.margin_top = 4.0;
        }));
    }
    if let Some(contact) = sections::join_present(&sections::contact_items(record), " • ") {
        let muted = theme.muted;
        header = header.child(Node::text(Tag::P, contact).style(|s| {
            s.font_size = Some(12.0);
            s.color = Some(muted);
            s.margin_top = 8.0;
        }));
    }
    if let Some(photo) = sections::profile_photo(record, 72.0) {
        header = header.child(photo.style(|s| s.margin_top = 12.0));
    }

    let (family, text) = (theme.family, theme.text);
    let mut root = Node::new(Tag::Div).class("template-minimal").style(|s| {
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
