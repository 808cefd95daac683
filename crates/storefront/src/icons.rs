//! Icon glyph rendering.
//!
//! Rendered fragments only carry icon placeholders
//! (`<i data-lucide="x" size="18"></i>`). After any region is rebuilt the
//! placeholders must be turned into glyphs again, which is what an
//! [`IconRenderer`] does.

use std::sync::LazyLock;

use regex::Regex;

/// Turns icon placeholders in freshly rendered HTML into glyphs.
pub trait IconRenderer {
    fn create_icons(&self, html: &str) -> String;
}

/// Leaves placeholders untouched, for pages that load an icon script.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderIcons;

impl IconRenderer for PlaceholderIcons {
    fn create_icons(&self, html: &str) -> String {
        html.to_owned()
    }
}

/// Replaces Lucide placeholders with inline SVG.
///
/// Unknown icon names keep their placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct LucideIcons;

/// Regex for matching icon placeholders.
///
/// Matches: `<i data-lucide="name" size="18"></i>` (size optional)
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<i\s+data-lucide="([a-z0-9-]+)"(?:\s+size="(\d+)")?\s*>\s*</i>"#)
        .expect("Invalid regex")
});

const DEFAULT_SIZE: &str = "24";

impl IconRenderer for LucideIcons {
    fn create_icons(&self, html: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(html, |caps: &regex::Captures| {
                let name = &caps[1];
                let size = caps.get(2).map_or(DEFAULT_SIZE, |m| m.as_str());

                glyph(name).map_or_else(
                    || caps[0].to_string(),
                    |body| render_svg(name, size, body),
                )
            })
            .into_owned()
    }
}

/// SVG body for a known icon.
fn glyph(name: &str) -> Option<&'static str> {
    let body = match name {
        "x" => r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#,
        "trash-2" => concat!(
            r#"<path d="M3 6h18"/><path d="M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6"/>"#,
            r#"<path d="M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2"/>"#,
            r#"<line x1="10" x2="10" y1="11" y2="17"/><line x1="14" x2="14" y1="11" y2="17"/>"#,
        ),
        "shopping-bag" => concat!(
            r#"<path d="M6 2 3 6v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2V6l-3-4Z"/>"#,
            r#"<path d="M3 6h18"/><path d="M16 10a4 4 0 0 1-8 0"/>"#,
        ),
        "heart" => concat!(
            r#"<path d="M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2"#,
            r#"-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z"/>"#,
        ),
        _ => return None,
    };
    Some(body)
}

fn render_svg(name: &str, size: &str, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="lucide lucide-{name}" width="{size}" height="{size}" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{body}</svg>"#
    )
}
