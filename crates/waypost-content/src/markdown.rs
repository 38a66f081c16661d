//! Markdown to sectioned page conversion.
//!
//! Heading levels start at h2: a markdown `#` becomes the page title (h2)
//! and each `##` becomes a sub-heading (h3) that opens an addressable
//! section. Content between the title and the first sub-heading is the
//! preamble; each sub-heading and its following siblings up to the next
//! sub-heading are wrapped in a container with id `{headingId}-container`.
//! Documents with no sub-headings are kept unsectioned.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// The derived title heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedTitle {
    pub id: String,
    pub text: String,

    /// Rendered `<h2>` markup.
    pub html: String,
}

/// One converted section, prior to decoration and sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedSection {
    pub id: String,
    pub title: String,

    /// Container markup including the sub-heading.
    pub html: String,
}

/// Output of markdown conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPage {
    /// First top-level heading, if the document has one.
    pub title: Option<ConvertedTitle>,

    /// Markup between the title and the first sub-heading. Empty when the
    /// page is unsectioned.
    pub preamble_html: String,

    /// Sections in document order; empty when the source had no
    /// sub-headings.
    pub sections: Vec<ConvertedSection>,

    /// Full body markup when the page is unsectioned.
    pub unsectioned_html: Option<String>,

    /// Every heading anchor id, in document order.
    pub heading_ids: Vec<String>,
}

/// A heading located in the transformed event stream.
struct Marker {
    /// Shifted level (2-6).
    level: u8,
    id: String,
    text: String,

    /// Event index of the opening tag.
    start: usize,

    /// Event index one past the closing tag.
    end: usize,
}

const MD_OPTIONS: Options = Options::ENABLE_TABLES;

/// Convert a markdown document into its page structure.
pub fn convert(source: &str) -> ConvertedPage {
    let ids = heading_ids(source);
    let (events, markers) = transform_events(source, &ids);

    let heading_ids: Vec<String> = markers.iter().map(|m| m.id.clone()).collect();

    let title_marker = markers.iter().find(|m| m.level == 2);
    let sub_markers: Vec<&Marker> = markers.iter().filter(|m| m.level == 3).collect();

    let title = title_marker.map(|m| ConvertedTitle {
        id: m.id.clone(),
        text: m.text.clone(),
        html: render(&events[m.start..m.end]),
    });

    if sub_markers.is_empty() {
        return ConvertedPage {
            title,
            preamble_html: String::new(),
            sections: Vec::new(),
            unsectioned_html: Some(render(&events)),
            heading_ids,
        };
    }

    // Sectioned layout drops anything preceding the title.
    let first_sub = sub_markers[0].start;
    let preamble_html = match title_marker {
        Some(m) if m.end <= first_sub => render(&events[m.end..first_sub]),
        _ => String::new(),
    };

    let mut sections = Vec::with_capacity(sub_markers.len());
    for (i, marker) in sub_markers.iter().enumerate() {
        let end = sub_markers
            .get(i + 1)
            .map_or(events.len(), |next| next.start);
        let inner = render(&events[marker.start..end]);

        sections.push(ConvertedSection {
            id: marker.id.clone(),
            title: marker.text.clone(),
            html: format!("<div id=\"{}-container\">{}</div>", marker.id, inner),
        });
    }

    ConvertedPage {
        title,
        preamble_html,
        sections,
        unsectioned_html: None,
        heading_ids,
    }
}

/// Collect heading texts and derive unique anchor ids, in document order.
fn heading_ids(source: &str) -> Vec<(String, String)> {
    let mut headings = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new_ext(source, MD_OPTIONS) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                current = Some(String::new());
            }
            Event::Text(text) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::Code(code) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&code);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = current.take() {
                    headings.push(text);
                }
            }
            _ => {}
        }
    }

    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    headings
        .into_iter()
        .map(|text| {
            let slug = slugify(&text);
            let count = seen.entry(slug.clone()).or_insert(0);
            let id = if *count == 0 {
                slug.clone()
            } else {
                format!("{slug}-{count}")
            };
            *count += 1;
            (id, text)
        })
        .collect()
}

/// Replace heading tags with raw markup carrying shifted levels and anchor
/// ids, recording where each heading sits in the resulting stream.
fn transform_events<'a>(source: &'a str, ids: &[(String, String)]) -> (Vec<Event<'a>>, Vec<Marker>) {
    let mut events: Vec<Event<'a>> = Vec::new();
    let mut markers: Vec<Marker> = Vec::new();

    let mut next_heading = 0;
    let mut open: Option<(u8, usize)> = None;

    for event in Parser::new_ext(source, MD_OPTIONS) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let shifted = (level as u8 + 1).min(6);
                let (id, _) = &ids[next_heading];
                events.push(Event::Html(
                    format!("<h{shifted} id=\"{id}\">").into(),
                ));
                open = Some((shifted, events.len() - 1));
            }
            Event::End(TagEnd::Heading(_)) => {
                let (shifted, start) = open.take().unwrap_or((2, events.len()));
                events.push(Event::Html(format!("</h{shifted}>").into()));

                let (id, text) = &ids[next_heading];
                markers.push(Marker {
                    level: shifted,
                    id: id.clone(),
                    text: text.clone(),
                    start,
                    end: events.len(),
                });
                next_heading += 1;
            }
            other => events.push(other),
        }
    }

    (events, markers)
}

/// Render a slice of the transformed stream to HTML.
fn render(events: &[Event<'_>]) -> String {
    let mut out = String::new();
    html::push_html(&mut out, events.iter().cloned());
    out
}

/// Convert heading text to a GitHub-compatible anchor slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shifts_heading_levels_to_start_at_h2() {
        let page = convert("# Title\n\nBody.");

        let title = page.title.unwrap();
        assert_eq!(title.html, "<h2 id=\"title\">Title</h2>");
        assert!(page.unsectioned_html.unwrap().contains("<p>Body.</p>"));
    }

    #[test]
    fn two_sub_headings_produce_exactly_two_containers() {
        let source = "# Guide\n\nIntro text.\n\n## Setup\n\nInstall it.\n\n## Usage\n\nRun it.";

        let page = convert(source);

        assert_eq!(page.sections.len(), 2);
        assert!(page.unsectioned_html.is_none());
        assert_eq!(page.preamble_html, "<p>Intro text.</p>\n");

        let setup = &page.sections[0];
        assert_eq!(setup.id, "setup");
        assert!(setup.html.starts_with("<div id=\"setup-container\">"));
        assert!(setup.html.contains("<h3 id=\"setup\">Setup</h3>"));
        assert!(setup.html.contains("Install it."));
        assert!(!setup.html.contains("Run it."));

        let usage = &page.sections[1];
        assert_eq!(usage.id, "usage");
        assert!(usage.html.contains("Run it."));
        assert!(!usage.html.contains("Install it."));
    }

    #[test]
    fn document_without_sub_headings_stays_unsectioned() {
        let page = convert("# Solo\n\nJust text.\n\n### Deep\n\nStill no sections.");

        assert!(page.sections.is_empty());
        let body = page.unsectioned_html.unwrap();
        assert!(body.contains("<h2 id=\"solo\">"));
        assert!(body.contains("<h4 id=\"deep\">"));
    }

    #[test]
    fn duplicate_heading_texts_get_suffixed_ids() {
        let page = convert("# Top\n\n## Notes\n\n## Notes\n");

        assert_eq!(page.heading_ids, vec!["top", "notes", "notes-1"]);
        assert_eq!(page.sections[1].id, "notes-1");
    }

    #[test]
    fn section_spans_stop_at_the_next_sub_heading_only() {
        let source = "# T\n\n## One\n\ntext\n\n### Nested\n\nmore\n\n## Two\n\nend";

        let page = convert(source);

        assert_eq!(page.sections.len(), 2);
        assert!(page.sections[0].html.contains("<h4 id=\"nested\">"));
        assert!(page.sections[0].html.contains("more"));
        assert!(!page.sections[0].html.contains("end"));
    }

    #[test]
    fn tables_are_enabled() {
        let page = convert("# T\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");

        assert!(page.unsectioned_html.unwrap().contains("<table>"));
    }

    #[test]
    fn slugify_matches_github_conventions() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Flight (Sim)"), "flight-sim");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
