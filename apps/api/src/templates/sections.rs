//! Section builders shared by every template.
//!
//! Each builder returns `None` when its list is empty, and every scalar field is left
//! out when blank, so a sparse record renders as a short surface with no empty headers.

use crate::models::record::ResumeRecord;
use crate::surface::metrics::FontFamily;
use crate::surface::node::{Align, Color, Display, Edges, FontWeight, Justify, Node, Radius, Tag, TextAlign};

/// Visual parameters a template hands to the shared builders.
#[derive(Debug, Clone)]
pub struct Theme {
    pub family: FontFamily,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub heading_size: f32,
    pub heading_weight: FontWeight,
    /// Thin rule under each section heading.
    pub heading_rule: bool,
    pub heading_align: TextAlign,
    /// Skill chips get this background; `None` renders plain rows.
    pub chip_background: Option<Color>,
}

pub const PROFILE_ALT: &str = "Profile";

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// "start - end", "start - Present", or just the end date.
pub fn date_range(start: &str, end: &str) -> Option<String> {
    match (non_blank(start), non_blank(end)) {
        (Some(s), Some(e)) => Some(format!("{s} - {e}")),
        (Some(s), None) => Some(format!("{s} - Present")),
        (None, Some(e)) => Some(e.to_string()),
        (None, None) => None,
    }
}

/// Joins the non-blank parts with `sep`.
pub fn join_present<S: AsRef<str>>(parts: &[S], sep: &str) -> Option<String> {
    let present: Vec<&str> = parts.iter().filter_map(|p| non_blank(p.as_ref())).collect();
    (!present.is_empty()).then(|| present.join(sep))
}

/// Title line: the explicit title, else the selected profession.
pub fn headline(record: &ResumeRecord) -> Option<String> {
    non_blank(&record.personal_info.title)
        .map(str::to_string)
        .or_else(|| record.effective_profession())
}

/// Contact values in display order, blanks dropped.
pub fn contact_items(record: &ResumeRecord) -> Vec<String> {
    let info = &record.personal_info;
    [&info.email, &info.phone, &info.location]
        .into_iter()
        .chain(info.social_links.iter())
        .filter_map(|s| non_blank(s))
        .map(str::to_string)
        .collect()
}

pub fn profile_photo(record: &ResumeRecord, size: f32) -> Option<Node> {
    non_blank(&record.personal_info.profile_picture).map(|src| {
        Node::img(src, PROFILE_ALT).style(|s| {
            s.width = Some(size);
            s.height = Some(size);
            s.radius = Radius::Full;
        })
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

fn section(class: &str, title: &str, theme: &Theme) -> Node {
    Node::new(Tag::Section)
        .class(class)
        .style(|s| s.margin_bottom = 24.0)
        .child(heading(title, theme))
}

fn heading(title: &str, theme: &Theme) -> Node {
    let (size, weight, color, align) = (
        theme.heading_size,
        theme.heading_weight,
        theme.accent,
        theme.heading_align,
    );
    let rule = theme.heading_rule.then_some((1.0, theme.muted));
    Node::text(Tag::H2, title).style(|s| {
        s.font_size = Some(size);
        s.font_weight = Some(weight);
        s.color = Some(color);
        s.text_align = Some(align);
        s.margin_bottom = 10.0;
        s.border_bottom = rule;
        if rule.is_some() {
            s.padding.bottom = 4.0;
        }
    })
}

fn muted(tag: Tag, text: impl Into<String>, theme: &Theme) -> Node {
    let color = theme.muted;
    Node::text(tag, text).style(|s| {
        s.color = Some(color);
        s.font_size = Some(12.0);
    })
}

fn bullets(items: &[String]) -> Option<Node> {
    let items: Vec<Node> = items
        .iter()
        .filter_map(|a| non_blank(a))
        .map(|a| {
            Node::text(Tag::Li, a).style(|s| {
                s.marker = true;
                s.margin_bottom = 2.0;
            })
        })
        .collect();
    (!items.is_empty()).then(|| {
        Node::new(Tag::Ul)
            .style(|s| {
                s.padding.left = 12.0;
                s.margin_top = 4.0;
            })
            .children(items)
    })
}

/// One entry: title row with the date pinned right, then optional subtitle,
/// description, bullets and a technology line.
struct Entry<'a> {
    title: Option<String>,
    subtitle: Option<String>,
    dates: Option<String>,
    description: &'a str,
    bullets: &'a [String],
    tags: &'a [String],
}

impl Entry<'_> {
    fn into_node(self, theme: &Theme) -> Option<Node> {
        let mut node = Node::new(Tag::Div).class("entry").style(|s| s.margin_bottom = 12.0);

        if self.title.is_some() || self.dates.is_some() {
            let mut row = Node::new(Tag::Div).style(|s| {
                s.display = Display::Flex;
                s.justify = Justify::SpaceBetween;
                s.align_items = Align::Center;
            });
            if let Some(title) = self.title {
                row = row.child(Node::text(Tag::H3, title).style(|s| s.font_size = Some(15.0)));
            }
            if let Some(dates) = self.dates {
                row = row.child(muted(Tag::Span, dates, theme));
            }
            node = node.child(row);
        }
        if let Some(subtitle) = self.subtitle {
            let accent = theme.accent;
            node = node.child(Node::text(Tag::P, subtitle).style(|s| s.color = Some(accent)));
        }
        if let Some(description) = non_blank(self.description) {
            node = node.child(Node::text(Tag::P, description).style(|s| s.margin_top = 4.0));
        }
        if let Some(list) = bullets(self.bullets) {
            node = node.child(list);
        }
        if let Some(tags) = join_present(self.tags, ", ") {
            node = node.child(muted(Tag::P, tags, theme).style(|s| s.margin_top = 4.0));
        }

        (!node.is_empty()).then_some(node)
    }
}

fn list_section<T>(
    class: &str,
    title: &str,
    items: &[T],
    theme: &Theme,
    entry: impl Fn(&T) -> Entry<'_>,
) -> Option<Node> {
    let entries: Vec<Node> = items
        .iter()
        .filter_map(|item| entry(item).into_node(theme))
        .collect();
    (!entries.is_empty()).then(|| section(class, title, theme).children(entries))
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

pub fn summary(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    non_blank(&record.personal_info.summary).map(|text| {
        section("summary-section", "Professional Summary", theme)
            .child(Node::text(Tag::P, text).style(|s| s.line_height = Some(1.5)))
    })
}

pub fn experience(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    list_section("experience-section", "Experience", &record.experience, theme, |e| Entry {
        title: non_blank(&e.position).map(str::to_string),
        subtitle: join_present(&[&e.company, &e.location], " · "),
        dates: date_range(&e.start_date, &e.end_date),
        description: &e.description,
        bullets: &e.achievements,
        tags: &e.technologies,
    })
}

pub fn education(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    list_section("education-section", "Education", &record.education, theme, |e| Entry {
        title: join_present(&[&e.degree, &e.field], " in "),
        subtitle: non_blank(&e.institution).map(|i| match non_blank(&e.gpa) {
            Some(gpa) => format!("{i} · GPA {gpa}"),
            None => i.to_string(),
        }),
        dates: date_range(&e.start_date, &e.end_date),
        description: "",
        bullets: &e.achievements,
        tags: &[],
    })
}

pub fn skills(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    let chip = theme.chip_background;
    let muted_color = theme.muted;
    let items: Vec<Node> = record
        .skills
        .iter()
        .filter_map(|skill| {
            let name = non_blank(&skill.name)?;
            let mut detail = skill.level.label().to_string();
            if skill.years_of_experience > 0 {
                let unit = if skill.years_of_experience == 1 { "yr" } else { "yrs" };
                detail.push_str(&format!(", {} {unit}", skill.years_of_experience));
            }
            Some(
                Node::new(Tag::Div)
                    .class("skill-item")
                    .style(|s| {
                        s.display = Display::Flex;
                        s.align_items = Align::Center;
                        s.gap = 6.0;
                        if let Some(bg) = chip {
                            s.background = Some(bg);
                            s.padding = Edges::xy(10.0, 4.0);
                            s.radius = Radius::Full;
                        }
                    })
                    .child(Node::text(Tag::Span, name).style(|s| s.font_weight = Some(FontWeight::Bold)))
                    .child(Node::text(Tag::Span, detail).style(|s| {
                        s.color = Some(muted_color);
                        s.font_size = Some(12.0);
                    })),
            )
        })
        .collect();
    if items.is_empty() {
        return None;
    }
    let list = Node::new(Tag::Div).class("skill-list").style(|s| {
        s.display = Display::Flex;
        s.wrap = true;
        s.gap = 8.0;
    });
    Some(
        section("skills-section", "Skills", theme).child(list.children(items)),
    )
}

pub fn projects(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    list_section("projects-section", "Projects", &record.projects, theme, |p| Entry {
        title: non_blank(&p.name).map(str::to_string),
        subtitle: non_blank(&p.link).map(str::to_string),
        dates: date_range(&p.start_date, &p.end_date),
        description: &p.description,
        bullets: &p.achievements,
        tags: &p.technologies,
    })
}

pub fn languages(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    let items: Vec<Node> = record
        .languages
        .iter()
        .filter_map(|l| {
            let name = non_blank(&l.name)?;
            let text = match non_blank(&l.proficiency) {
                Some(p) => format!("{name} ({p})"),
                None => name.to_string(),
            };
            Some(Node::text(Tag::Span, text))
        })
        .collect();
    (!items.is_empty()).then(|| {
        section("languages-section", "Languages", theme).child(
            Node::new(Tag::Div)
                .style(|s| {
                    s.display = Display::Flex;
                    s.wrap = true;
                    s.gap = 16.0;
                })
                .children(items),
        )
    })
}

pub fn certifications(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    list_section("certifications-section", "Certifications", &record.certifications, theme, |c| Entry {
        title: non_blank(&c.name).map(str::to_string),
        subtitle: join_present(
            &[
                c.issuer.clone(),
                non_blank(&c.credential_id)
                    .map(|id| format!("ID {id}"))
                    .unwrap_or_default(),
            ],
            " · ",
        ),
        dates: match (non_blank(&c.date), non_blank(&c.expiry_date)) {
            (Some(d), Some(x)) => Some(format!("{d} - {x}")),
            (Some(d), None) => Some(d.to_string()),
            (None, Some(x)) => Some(format!("Expires {x}")),
            (None, None) => None,
        },
        description: "",
        bullets: &[],
        tags: &[],
    })
}

pub fn awards(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    list_section("awards-section", "Awards", &record.awards, theme, |a| Entry {
        title: non_blank(&a.title).map(str::to_string),
        subtitle: non_blank(&a.issuer).map(str::to_string),
        dates: non_blank(&a.date).map(str::to_string),
        description: &a.description,
        bullets: &[],
        tags: &[],
    })
}

pub fn volunteer(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    list_section("volunteer-section", "Volunteer Work", &record.volunteer, theme, |v| Entry {
        title: non_blank(&v.role).map(str::to_string),
        subtitle: non_blank(&v.organization).map(str::to_string),
        dates: date_range(&v.start_date, &v.end_date),
        description: &v.description,
        bullets: &[],
        tags: &[],
    })
}

pub fn publications(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    list_section("publications-section", "Publications", &record.publications, theme, |p| Entry {
        title: non_blank(&p.title).map(str::to_string),
        subtitle: join_present(&[&p.publisher, &p.link], " · "),
        dates: non_blank(&p.date).map(str::to_string),
        description: &p.description,
        bullets: &[],
        tags: &[],
    })
}

pub fn references(record: &ResumeRecord, theme: &Theme) -> Option<Node> {
    list_section("references-section", "References", &record.references, theme, |r| Entry {
        title: non_blank(&r.name).map(str::to_string),
        subtitle: match (non_blank(&r.position), non_blank(&r.company)) {
            (Some(p), Some(c)) => Some(format!("{p}, {c}")),
            (p, c) => p.or(c).map(str::to_string),
        },
        dates: None,
        description: "",
        bullets: &[],
        tags: &[],
    }
    .with_contact(&r.email, &r.phone))
}

impl Entry<'_> {
    /// Appends contact details to the subtitle line.
    fn with_contact(mut self, email: &str, phone: &str) -> Self {
        if let Some(contact) = join_present(&[email, phone], " · ") {
            self.subtitle = Some(match self.subtitle {
                Some(s) => format!("{s} · {contact}"),
                None => contact,
            });
        }
        self
    }
}

/// Every body section in the standard order, empty ones dropped.
pub fn body_sections(record: &ResumeRecord, theme: &Theme) -> Vec<Node> {
    [
        summary(record, theme),
        experience(record, theme),
        education(record, theme),
        skills(record, theme),
        projects(record, theme),
        certifications(record, theme),
        languages(record, theme),
        awards(record, theme),
        volunteer(record, theme),
        publications(record, theme),
        references(record, theme),
    ]
    .into_iter()
    .flatten()
    .collect()
}
