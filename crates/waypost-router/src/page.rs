//! Loaded page model.

/// The page title heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle {
    /// Anchor id, corrected to the route's path stem on load.
    pub id: String,

    /// Heading text.
    pub text: String,
}

/// One addressable section: a sub-heading plus the content that follows it
/// up to the next sub-heading, wrapped in a container with id
/// `{id}-container`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Sub-heading anchor id.
    pub id: String,

    /// Sub-heading text.
    pub title: String,

    /// Sanitized container markup, including the heading.
    pub html: String,
}

impl Section {
    /// DOM id of the section's container element.
    pub fn container_id(&self) -> String {
        format!("{}-container", self.id)
    }
}

/// Fully processed content for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Page title heading.
    pub title: PageTitle,

    /// Sanitized markup preceding the first section. Empty when the page is
    /// unsectioned.
    pub preamble_html: String,

    /// Addressable sections, in document order. Empty when the source had no
    /// sub-headings.
    pub sections: Vec<Section>,

    /// Every heading anchor id in the document, title included. Used to
    /// resolve hash fragments.
    pub heading_ids: Vec<String>,

    /// The full sanitized page markup.
    pub html: String,
}

impl PageContent {
    /// Whether the page was split into section containers.
    pub fn is_sectioned(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Section with the given heading id, if any.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Whether any heading in the document carries this anchor id.
    pub fn has_heading(&self, id: &str) -> bool {
        self.heading_ids.iter().any(|h| h == id)
    }
}

/// Build a minimal page for router-level tests.
#[cfg(test)]
pub(crate) fn test_page(title_id: &str, section_ids: &[&str]) -> PageContent {
    let sections: Vec<Section> = section_ids
        .iter()
        .map(|id| Section {
            id: (*id).to_string(),
            title: (*id).to_string(),
            html: format!("<div id=\"{id}-container\"><h3 id=\"{id}\">{id}</h3></div>"),
        })
        .collect();

    let mut heading_ids = vec![title_id.to_string()];
    heading_ids.extend(section_ids.iter().map(|s| s.to_string()));

    PageContent {
        title: PageTitle {
            id: title_id.to_string(),
            text: title_id.to_string(),
        },
        preamble_html: String::new(),
        sections,
        heading_ids,
        html: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title_id: &str, section_ids: &[&str]) -> PageContent {
        test_page(title_id, section_ids)
    }

    #[test]
    fn resolves_sections_and_headings() {
        let page = page("guide", &["setup", "usage"]);

        assert!(page.is_sectioned());
        assert_eq!(page.section("setup").unwrap().container_id(), "setup-container");
        assert!(page.has_heading("guide"));
        assert!(page.has_heading("usage"));
        assert!(!page.has_heading("missing"));
    }
}
