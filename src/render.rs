//! Output model and HTML rendering.
//!
//! Command output is either [`Output::Text`], which is always escaped, or one
//! of the fixed [`Markup`] shapes. No variant carries caller-provided markup,
//! and every string interpolated into a markup shape is escaped too.

use serde::Serialize;

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// The only shapes allowed to render as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Listing(Vec<ListingEntry>),
    SudoImage { src: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Markup(Markup),
}

impl Output {
    pub fn text(s: impl Into<String>) -> Self {
        Output::Text(s.into())
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Output::Markup(_))
    }

    pub fn to_html(&self) -> String {
        match self {
            Output::Text(text) => escape_html(text),
            Output::Markup(Markup::Listing(entries)) => {
                let mut html = String::from(r#"<div class="flex flex-wrap gap-1">"#);
                for entry in entries {
                    let class = match entry.kind {
                        EntryKind::Directory => "text-ubt-blue font-bold",
                        EntryKind::File => "text-ubt-green",
                    };
                    html.push_str(&format!(
                        r#"<span class="{} mr-4 mb-1 inline-block">{}</span>"#,
                        class,
                        escape_html(&entry.name)
                    ));
                }
                html.push_str("</div>");
                html
            }
            Output::Markup(Markup::SudoImage { src }) => format!(
                r#"<img class="w-2/5 max-w-md my-2" src="{}" alt="Sudo meme" />"#,
                escape_html(src)
            ),
        }
    }

    /// Unstyled form, for hosts that render with `textContent`.
    pub fn to_plain(&self) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Markup(Markup::Listing(entries)) => entries
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join("  "),
            Output::Markup(Markup::SudoImage { .. }) => String::new(),
        }
    }
}

/// Prompt as HTML spans: `user@host:path$`.
pub fn prompt_html(user: &str, hostname: &str, path: &str) -> String {
    format!(
        r#"<span class="text-ubt-green font-medium">{}@{}</span><span class="text-ubt-grey mx-1">:</span><span class="text-ubt-blue font-medium">{}</span><span class="text-ubt-grey mr-2">$</span>"#,
        escape_html(user),
        escape_html(hostname),
        escape_html(path)
    )
}
