//! DOM-like node tree produced by the template renderer.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::surface::metrics::FontFamily;

// ────────────────────────────────────────────────────────────────────────────
// Style primitives
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn all(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub const fn xy(x: f32, y: f32) -> Self {
        Self {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Display {
    /// Children stack vertically.
    #[default]
    Block,
    /// Children flow horizontally.
    Flex,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Justify {
    #[default]
    Start,
    Center,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Align {
    #[default]
    Start,
    Center,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum Radius {
    #[default]
    None,
    Px(f32),
    /// 50% of the box: a circle for square boxes, a pill for text chips.
    Full,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ObjectFit {
    #[default]
    Fill,
    Cover,
}

/// Box and text properties of one node. Text properties left as `None` inherit
/// from the nearest ancestor that sets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    pub display: Display,
    pub justify: Justify,
    pub align_items: Align,
    pub wrap: bool,
    pub gap: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub padding: Edges,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub background: Option<Color>,
    pub border_left: Option<(f32, Color)>,
    pub border_bottom: Option<(f32, Color)>,
    pub radius: Radius,
    pub object_fit: ObjectFit,
    /// Prefix a bullet marker (list items).
    pub marker: bool,

    pub font_family: Option<FontFamily>,
    pub font_size: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub color: Option<Color>,
    /// Line height as a multiple of the font size.
    pub line_height: Option<f32>,
    pub text_align: Option<TextAlign>,
}

// ────────────────────────────────────────────────────────────────────────────
// Nodes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Div,
    Section,
    Header,
    H1,
    H2,
    H3,
    P,
    Span,
    Ul,
    Li,
    A,
    Img,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub tag: Tag,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub style: Style,
    /// Leaf text content. Text nodes have no children.
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: Style::default(),
            text: None,
            children: Vec::new(),
        }
    }

    /// A leaf carrying `text`.
    pub fn text(tag: Tag, text: impl Into<String>) -> Self {
        let mut node = Self::new(tag);
        node.text = Some(text.into());
        node
    }

    pub fn img(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::new(Tag::Img).attr("src", src).attr("alt", alt)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn style(mut self, edit: impl FnOnce(&mut Style)) -> Self {
        edit(&mut self.style);
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_value(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// True when the subtree carries neither text nor images.
    pub fn is_empty(&self) -> bool {
        let has_own = self.tag == Tag::Img
            || self
                .text
                .as_deref()
                .is_some_and(|t| !t.trim().is_empty());
        !has_own && self.children.iter().all(Node::is_empty)
    }

    /// Depth-first search for the node with `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// Visits every node in the subtree (pre-order), mutably.
    pub fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut Node)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    /// Visits every node in the subtree (pre-order).
    pub fn walk(&self, visit: &mut dyn FnMut(&Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// All text in document order, one entry per text leaf.
    pub fn text_content(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.walk(&mut |n| {
            if let Some(t) = &n.text {
                out.push(t.clone());
            }
        });
        out
    }
}
