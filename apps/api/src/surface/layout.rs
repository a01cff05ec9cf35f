//! Box layout: turns a node tree into a flat draw list.
//!
//! # Model
//! - Block children stack vertically; margins are applied by the parent.
//! - Flex children sit in a row at their intrinsic width (or explicit `width`),
//!   wrapping onto new rows when `wrap` is set.
//! - Text is greedy word-wrapped with the static tables in `surface::metrics`.
//! - Height always follows content unless `height` is set explicitly.
//!
//! Layout is pure and CPU-bound: callers on the async runtime must run it inside
//! `tokio::task::spawn_blocking`.

use serde::Serialize;

use crate::surface::metrics::{weight_factor, FontFamily};
use crate::surface::node::{
    Align, Color, Display, FontWeight, Justify, Node, ObjectFit, Radius, Style, Tag, TextAlign,
};

const DEFAULT_FONT_SIZE: f32 = 14.0;
const DEFAULT_LINE_HEIGHT: f32 = 1.4;
const DEFAULT_TEXT_COLOR: Color = Color::rgb(0x1f, 0x29, 0x37);
const BULLET_PREFIX: &str = "• ";

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Paint {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Color,
        radius: f32,
    },
    /// One wrapped line of text. `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        weight: FontWeight,
        family: FontFamily,
        color: Color,
        centered: bool,
    },
    Image {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        href: String,
        fit: ObjectFit,
        /// Elliptical clip (50% radius) instead of a rounded rectangle.
        round: bool,
        radius: f32,
    },
}

impl Paint {
    fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Paint::Rect { x, y, .. } | Paint::Text { x, y, .. } | Paint::Image { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub width: f32,
    pub height: f32,
    pub paints: Vec<Paint>,
}

// ────────────────────────────────────────────────────────────────────────────
// Inherited text context
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct TextCtx {
    family: FontFamily,
    size: f32,
    weight: FontWeight,
    color: Color,
    line_height: f32,
    align: TextAlign,
}

impl Default for TextCtx {
    fn default() -> Self {
        Self {
            family: FontFamily::Sans,
            size: DEFAULT_FONT_SIZE,
            weight: FontWeight::Normal,
            color: DEFAULT_TEXT_COLOR,
            line_height: DEFAULT_LINE_HEIGHT,
            align: TextAlign::Left,
        }
    }
}

impl TextCtx {
    fn inherit(&self, tag: Tag, style: &Style) -> Self {
        let (tag_size, tag_weight) = match tag {
            Tag::H1 => (Some(28.0), Some(FontWeight::Bold)),
            Tag::H2 => (Some(20.0), Some(FontWeight::Bold)),
            Tag::H3 => (Some(16.0), Some(FontWeight::Bold)),
            _ => (None, None),
        };
        Self {
            family: style.font_family.unwrap_or(self.family),
            size: style.font_size.or(tag_size).unwrap_or(self.size),
            weight: style.font_weight.or(tag_weight).unwrap_or(self.weight),
            color: style.color.unwrap_or(self.color),
            line_height: style.line_height.unwrap_or(self.line_height),
            align: style.text_align.unwrap_or(self.align),
        }
    }

    fn line_px(&self) -> f32 {
        self.size * self.line_height
    }

    fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        self.family
            .metrics()
            .wrap(text, self.size, weight_factor(self.weight), max_width)
    }

    fn measure(&self, text: &str) -> f32 {
        self.family
            .metrics()
            .measure_px(text, self.size, weight_factor(self.weight))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `root` at the given width. If `root` sets its own `width`, that wins.
pub fn layout(root: &Node, width: f32) -> LayoutResult {
    let width = root.style.width.unwrap_or(width);
    let mut paints = Vec::new();
    let height = layout_node(root, 0.0, 0.0, width, &TextCtx::default(), &mut paints);
    LayoutResult {
        width,
        height,
        paints,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recursive layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `node` with its border box at (x, y) and returns the border-box height.
fn layout_node(
    node: &Node,
    x: f32,
    y: f32,
    avail_width: f32,
    parent: &TextCtx,
    out: &mut Vec<Paint>,
) -> f32 {
    let style = &node.style;
    let ctx = parent.inherit(node.tag, style);
    let width = style.width.unwrap_or(avail_width).max(0.0);

    if node.tag == Tag::Img {
        let height = style.height.unwrap_or(width);
        if let Some(src) = node.attr_value("src") {
            let (round, radius) = match style.radius {
                Radius::Full => (true, width.min(height) / 2.0),
                Radius::Px(r) => (false, r),
                Radius::None => (false, 0.0),
            };
            out.push(Paint::Image {
                x,
                y,
                w: width,
                h: height,
                href: src.to_string(),
                fit: style.object_fit,
                round,
                radius,
            });
        }
        return height;
    }

    // Background is painted under the content, but its height is only known
    // after the children are placed.
    let background_index = style.background.map(|fill| {
        out.push(Paint::Rect {
            x,
            y,
            w: width,
            h: 0.0,
            fill,
            radius: 0.0,
        });
        out.len() - 1
    });

    let border_left = style.border_left.map(|(w, _)| w).unwrap_or(0.0);
    let content_x = x + style.padding.left + border_left;
    let content_width = (width - style.padding.horizontal() - border_left).max(0.0);
    let content_y = y + style.padding.top;

    let mut content_height = 0.0;
    if let Some(text) = node.text.as_deref() {
        content_height += layout_text(node, text, content_x, content_y, content_width, &ctx, out);
    }
    if !node.children.is_empty() {
        let children_y = content_y + content_height;
        content_height += match style.display {
            Display::Block => layout_block_children(node, content_x, children_y, content_width, &ctx, out),
            Display::Flex => layout_flex_children(node, content_x, children_y, content_width, &ctx, out),
        };
    }

    let height = style
        .height
        .unwrap_or(content_height + style.padding.vertical());

    if let Some(index) = background_index {
        if let Some(Paint::Rect { h, radius, .. }) = out.get_mut(index) {
            *h = height;
            *radius = resolve_radius(style.radius, width, height);
        }
    }
    if let Some((w, fill)) = style.border_left {
        out.push(Paint::Rect {
            x,
            y,
            w,
            h: height,
            fill,
            radius: 0.0,
        });
    }
    if let Some((w, fill)) = style.border_bottom {
        out.push(Paint::Rect {
            x,
            y: y + height - w,
            w: width,
            h: w,
            fill,
            radius: 0.0,
        });
    }

    height
}

fn layout_text(
    node: &Node,
    text: &str,
    x: f32,
    y: f32,
    width: f32,
    ctx: &TextCtx,
    out: &mut Vec<Paint>,
) -> f32 {
    let owned;
    let text = if node.style.marker {
        owned = format!("{BULLET_PREFIX}{text}");
        owned.as_str()
    } else {
        text
    };

    let lines = ctx.wrap(text, width);
    let line_px = ctx.line_px();
    let centered = ctx.align == TextAlign::Center;
    // Baseline sits at 80% of the glyph box, centred in the line box.
    let baseline_offset = (line_px - ctx.size) / 2.0 + ctx.size * 0.8;

    for (i, line) in lines.iter().enumerate() {
        out.push(Paint::Text {
            x: if centered { x + width / 2.0 } else { x },
            y: y + i as f32 * line_px + baseline_offset,
            text: line.clone(),
            size: ctx.size,
            weight: ctx.weight,
            family: ctx.family,
            color: ctx.color,
            centered,
        });
    }
    lines.len() as f32 * line_px
}

fn layout_block_children(
    node: &Node,
    x: f32,
    y: f32,
    width: f32,
    ctx: &TextCtx,
    out: &mut Vec<Paint>,
) -> f32 {
    let mut cursor = 0.0;
    for (i, child) in node.children.iter().enumerate() {
        if i > 0 {
            cursor += node.style.gap;
        }
        cursor += child.style.margin_top;
        let child_width = child.style.width.unwrap_or(width).min(width);
        let child_x = match (ctx.align, child.style.width.is_some()) {
            (TextAlign::Center, true) => x + (width - child_width) / 2.0,
            _ => x,
        };
        cursor += layout_node(child, child_x, y + cursor, child_width, ctx, out);
        cursor += child.style.margin_bottom;
    }
    cursor
}

struct Placed {
    width: f32,
    height: f32,
    margin_top: f32,
    margin_bottom: f32,
    paints: Vec<Paint>,
}

impl Placed {
    fn outer_height(&self) -> f32 {
        self.margin_top + self.height + self.margin_bottom
    }
}

fn layout_flex_children(
    node: &Node,
    x: f32,
    y: f32,
    width: f32,
    ctx: &TextCtx,
    out: &mut Vec<Paint>,
) -> f32 {
    let style = &node.style;

    // Each child is laid out at the origin into a scratch list, then moved into place.
    let placed: Vec<Placed> = node
        .children
        .iter()
        .map(|child| {
            let child_width = child
                .style
                .width
                .unwrap_or_else(|| intrinsic_width(child, ctx))
                .min(width);
            let mut paints = Vec::new();
            let height = layout_node(child, 0.0, 0.0, child_width, ctx, &mut paints);
            Placed {
                width: child_width,
                height,
                margin_top: child.style.margin_top,
                margin_bottom: child.style.margin_bottom,
                paints,
            }
        })
        .collect();

    let rows = split_rows(&placed, width, style.gap, style.wrap);

    let mut cursor = 0.0;
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            cursor += style.gap;
        }
        let items = &placed[row.clone()];
        let row_height = items.iter().map(Placed::outer_height).fold(0.0, f32::max);
        let used: f32 = items.iter().map(|p| p.width).sum();
        let free = (width - used).max(0.0);

        let (mut dx, spacing) = match style.justify {
            Justify::Start => (0.0, style.gap),
            Justify::Center => {
                let gaps = style.gap * items.len().saturating_sub(1) as f32;
                (((free - gaps) / 2.0).max(0.0), style.gap)
            }
            Justify::SpaceBetween if items.len() > 1 => (0.0, free / (items.len() - 1) as f32),
            Justify::SpaceBetween => (0.0, 0.0),
        };

        for item in items {
            let dy = match style.align_items {
                Align::Start => item.margin_top,
                Align::Center => (row_height - item.height) / 2.0,
            };
            for paint in &item.paints {
                let mut paint = paint.clone();
                paint.translate(x + dx, y + cursor + dy);
                out.push(paint);
            }
            dx += item.width + spacing;
        }
        cursor += row_height;
    }
    cursor
}

/// Groups placed children into rows. Without wrapping everything shares one row.
fn split_rows(placed: &[Placed], width: f32, gap: f32, wrap: bool) -> Vec<std::ops::Range<usize>> {
    if placed.is_empty() {
        return Vec::new();
    }
    if !wrap {
        return vec![0..placed.len()];
    }
    let mut rows = Vec::new();
    let mut start = 0;
    let mut line_width = 0.0;
    for (i, item) in placed.iter().enumerate() {
        let needed = if i == start {
            item.width
        } else {
            line_width + gap + item.width
        };
        if i > start && needed > width {
            rows.push(start..i);
            start = i;
            line_width = item.width;
        } else {
            line_width = needed;
        }
    }
    rows.push(start..placed.len());
    rows
}

/// Unwrapped width of a node's content plus its own padding.
fn intrinsic_width(node: &Node, parent: &TextCtx) -> f32 {
    let style = &node.style;
    if let Some(w) = style.width {
        return w;
    }
    if node.tag == Tag::Img {
        return style.height.unwrap_or(0.0);
    }
    let ctx = parent.inherit(node.tag, style);

    let text_width = node
        .text
        .as_deref()
        .map(|t| {
            let prefix = if style.marker { ctx.measure(BULLET_PREFIX) } else { 0.0 };
            prefix
                + t.split('\n')
                    .map(|line| ctx.measure(line.trim()))
                    .fold(0.0, f32::max)
        })
        .unwrap_or(0.0);

    let children_width = match style.display {
        Display::Block => node
            .children
            .iter()
            .map(|c| intrinsic_width(c, &ctx))
            .fold(0.0, f32::max),
        Display::Flex => {
            let sum: f32 = node.children.iter().map(|c| intrinsic_width(c, &ctx)).sum();
            sum + style.gap * node.children.len().saturating_sub(1) as f32
        }
    };

    let border = style.border_left.map(|(w, _)| w).unwrap_or(0.0);
    // Rounding slack so the measured text never wraps at its own width.
    text_width.max(children_width) + style.padding.horizontal() + border + 0.5
}

fn resolve_radius(radius: Radius, width: f32, height: f32) -> f32 {
    match radius {
        Radius::None => 0.0,
        Radius::Px(r) => r,
        Radius::Full => width.min(height) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::node::Edges;

    fn texts(result: &LayoutResult) -> Vec<&str> {
        result
            .paints
            .iter()
            .filter_map(|p| match p {
                Paint::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_block_children_stack_vertically() {
        let root = Node::new(Tag::Div)
            .child(Node::text(Tag::P, "one").style(|s| s.margin_bottom = 10.0))
            .child(Node::text(Tag::P, "two"));
        let result = layout(&root, 400.0);
        let line = DEFAULT_FONT_SIZE * DEFAULT_LINE_HEIGHT;
        assert!((result.height - (2.0 * line + 10.0)).abs() < 1e-3);
        assert_eq!(texts(&result), vec!["one", "two"]);
    }

    #[test]
    fn test_padding_adds_to_height() {
        let root = Node::new(Tag::Div)
            .style(|s| s.padding = Edges::all(40.0))
            .child(Node::text(Tag::P, "x"));
        let result = layout(&root, 800.0);
        let line = DEFAULT_FONT_SIZE * DEFAULT_LINE_HEIGHT;
        assert!((result.height - (line + 80.0)).abs() < 1e-3);
    }

    #[test]
    fn test_explicit_width_overrides_available() {
        let root = Node::new(Tag::Div).style(|s| s.width = Some(800.0));
        assert_eq!(layout(&root, 300.0).width, 800.0);
    }

    #[test]
    fn test_background_rect_covers_full_height() {
        let root = Node::new(Tag::Div)
            .style(|s| s.background = Some(Color::WHITE))
            .child(Node::text(Tag::P, "a"))
            .child(Node::text(Tag::P, "b"));
        let result = layout(&root, 200.0);
        match &result.paints[0] {
            Paint::Rect { h, fill, .. } => {
                assert_eq!(*fill, Color::WHITE);
                assert!((h - result.height).abs() < 1e-3);
            }
            other => panic!("expected background rect, got {other:?}"),
        }
    }

    #[test]
    fn test_long_text_wraps_and_grows() {
        let words = "lorem ipsum dolor sit amet ".repeat(20);
        let root = Node::new(Tag::Div).child(Node::text(Tag::P, words));
        let narrow = layout(&root, 200.0);
        let wide = layout(&root, 800.0);
        assert!(narrow.height > wide.height);
    }

    #[test]
    fn test_long_url_stays_inside_its_box() {
        let url = "https://www.linkedin.com/in/ada-lovelace-analytical-engine-programmer";
        let root = Node::new(Tag::Div).child(Node::text(Tag::P, url));
        let result = layout(&root, 200.0);
        let metrics = FontFamily::Sans.metrics();
        let lines = texts(&result);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.measure_px(line, DEFAULT_FONT_SIZE, 1.0) <= 200.0 + 1e-3, "{line}");
        }
        assert_eq!(lines.concat(), url);
    }

    #[test]
    fn test_flex_row_places_children_side_by_side() {
        let root = Node::new(Tag::Div)
            .style(|s| {
                s.display = Display::Flex;
                s.gap = 8.0;
            })
            .child(Node::text(Tag::Span, "left"))
            .child(Node::text(Tag::Span, "right"));
        let result = layout(&root, 400.0);
        let xs: Vec<f32> = result
            .paints
            .iter()
            .filter_map(|p| match p {
                Paint::Text { x, .. } => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(xs.len(), 2);
        assert!(xs[1] > xs[0]);
        // Single row: height is one line.
        let line = DEFAULT_FONT_SIZE * DEFAULT_LINE_HEIGHT;
        assert!((result.height - line).abs() < 1e-3);
    }

    #[test]
    fn test_flex_wrap_breaks_rows() {
        let chip = |t: &str| Node::text(Tag::Span, t).style(|s| s.width = Some(150.0));
        let root = Node::new(Tag::Div)
            .style(|s| {
                s.display = Display::Flex;
                s.wrap = true;
                s.gap = 10.0;
            })
            .children(vec![chip("a"), chip("b"), chip("c")]);
        let result = layout(&root, 320.0);
        let line = DEFAULT_FONT_SIZE * DEFAULT_LINE_HEIGHT;
        // Two per row (150 + 10 + 150 = 310), so two rows.
        assert!((result.height - (2.0 * line + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_space_between_pins_last_child_right() {
        let root = Node::new(Tag::Div)
            .style(|s| {
                s.display = Display::Flex;
                s.justify = Justify::SpaceBetween;
            })
            .child(Node::text(Tag::Span, "a").style(|s| s.width = Some(50.0)))
            .child(Node::text(Tag::Span, "b").style(|s| s.width = Some(50.0)));
        let result = layout(&root, 400.0);
        let last_x = result
            .paints
            .iter()
            .filter_map(|p| match p {
                Paint::Text { x, .. } => Some(*x),
                _ => None,
            })
            .last()
            .unwrap();
        assert!((last_x - 350.0).abs() < 1e-3);
    }

    #[test]
    fn test_image_uses_style_box_and_round_clip() {
        let root = Node::new(Tag::Div).child(Node::img("data:image/png;base64,AA", "Profile").style(|s| {
            s.width = Some(100.0);
            s.height = Some(100.0);
            s.radius = Radius::Full;
            s.object_fit = ObjectFit::Cover;
        }));
        let result = layout(&root, 800.0);
        assert_eq!(result.height, 100.0);
        match &result.paints[0] {
            Paint::Image { w, h, round, radius, fit, .. } => {
                assert_eq!((*w, *h), (100.0, 100.0));
                assert!(*round);
                assert_eq!(*radius, 50.0);
                assert_eq!(*fit, ObjectFit::Cover);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_marker_prefixes_bullet() {
        let root = Node::new(Tag::Ul).child(Node::text(Tag::Li, "Shipped v2").style(|s| s.marker = true));
        assert_eq!(texts(&layout(&root, 400.0)), vec!["• Shipped v2"]);
    }

    #[test]
    fn test_heading_defaults_inherit_to_text() {
        let root = Node::text(Tag::H1, "Ada");
        match &layout(&root, 400.0).paints[0] {
            Paint::Text { size, weight, .. } => {
                assert_eq!(*size, 28.0);
                assert_eq!(*weight, FontWeight::Bold);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }
}
