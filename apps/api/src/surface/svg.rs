//! Draw list → standalone SVG document.

use std::fmt::Write as _;

use crate::surface::layout::{LayoutResult, Paint};
use crate::surface::node::{FontWeight, ObjectFit};

/// Serializes a laid-out surface. The canvas is `width × height` user units with the
/// origin at the top-left of the surface.
pub fn to_svg(layout: &LayoutResult) -> String {
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    let mut svg = String::with_capacity(256 + layout.paints.len() * 160);
    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt_num(width),
        h = fmt_num(height),
    );

    let mut clip_count = 0usize;
    for paint in &layout.paints {
        match paint {
            Paint::Rect {
                x,
                y,
                w,
                h,
                fill,
                radius,
            } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*w),
                    fmt_num(*h),
                    fill.hex()
                );
                if *radius > 0.0 {
                    let _ = write!(svg, r#" rx="{r}" ry="{r}""#, r = fmt_num(*radius));
                }
                svg.push_str("/>");
            }
            Paint::Text {
                x,
                y,
                text,
                size,
                weight,
                family,
                color,
                centered,
            } => {
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}"{} xml:space="preserve">{}</text>"#,
                    fmt_num(*x),
                    fmt_num(*y),
                    escape_xml(family.font_stack()),
                    fmt_num(*size),
                    weight_value(*weight),
                    color.hex(),
                    if *centered { r#" text-anchor="middle""# } else { "" },
                    escape_xml(text)
                );
            }
            Paint::Image {
                x,
                y,
                w,
                h,
                href,
                fit,
                round,
                radius,
            } => {
                let clip = if *round || *radius > 0.0 {
                    clip_count += 1;
                    let id = format!("clip{clip_count}");
                    if *round {
                        let _ = write!(
                            svg,
                            r#"<clipPath id="{id}"><ellipse cx="{}" cy="{}" rx="{}" ry="{}"/></clipPath>"#,
                            fmt_num(x + w / 2.0),
                            fmt_num(y + h / 2.0),
                            fmt_num(w / 2.0),
                            fmt_num(h / 2.0)
                        );
                    } else {
                        let _ = write!(
                            svg,
                            r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}"/></clipPath>"#,
                            fmt_num(*x),
                            fmt_num(*y),
                            fmt_num(*w),
                            fmt_num(*h),
                            r = fmt_num(*radius)
                        );
                    }
                    Some(id)
                } else {
                    None
                };
                let aspect = match fit {
                    ObjectFit::Cover => "xMidYMid slice",
                    ObjectFit::Fill => "none",
                };
                let _ = write!(
                    svg,
                    r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="{aspect}" xlink:href="{}""#,
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*w),
                    fmt_num(*h),
                    escape_xml(href)
                );
                if let Some(id) = clip {
                    let _ = write!(svg, r#" clip-path="url(#{id})""#);
                }
                svg.push_str("/>");
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn weight_value(weight: FontWeight) -> u16 {
    match weight {
        FontWeight::Light => 300,
        FontWeight::Normal => 400,
        FontWeight::Bold => 700,
    }
}

/// Two decimals, trailing zeros trimmed.
fn fmt_num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters are not allowed in XML 1.0.
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::layout::layout;
    use crate::surface::node::{Color, Node, Radius, Tag};

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"R&D <"lead">"#), "R&amp;D &lt;&quot;lead&quot;&gt;");
        assert_eq!(escape_xml("a\u{1}b"), "ab");
    }

    #[test]
    fn test_fmt_num_trims() {
        assert_eq!(fmt_num(800.0), "800");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_svg_contains_text_and_dimensions() {
        let root = Node::new(Tag::Div)
            .style(|s| s.background = Some(Color::WHITE))
            .child(Node::text(Tag::H1, "Ada & Co"));
        let svg = to_svg(&layout(&root, 800.0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="800""#));
        assert!(svg.contains("Ada &amp; Co"));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_round_image_gets_cover_and_clip() {
        let root = Node::img("data:image/png;base64,AA", "Profile").style(|s| {
            s.width = Some(100.0);
            s.height = Some(100.0);
            s.radius = Radius::Full;
            s.object_fit = crate::surface::node::ObjectFit::Cover;
        });
        let svg = to_svg(&layout(&root, 800.0));
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid slice""#));
        assert!(svg.contains(r#"<ellipse cx="50" cy="50" rx="50" ry="50"/>"#));
        assert!(svg.contains(r#"clip-path="url(#clip1)""#));
    }
}
