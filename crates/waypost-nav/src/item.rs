//! Sidebar list entries.

/// One sidebar entry, pairing a list item with a heading in loaded
/// content. Items are destroyed and rebuilt wholesale on each hydrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Route-relative path, trimmed of the base prefix.
    pub route_path: String,

    /// Anchor id of the heading this entry links to.
    pub name: String,

    /// Display text.
    pub label: String,

    /// Top-level page entry vs. sub-heading entry.
    pub is_main: bool,

    /// Highlighted as part of the active route.
    pub active: bool,

    /// For sub-heading entries: the section container currently sits in
    /// the viewport highlight band.
    pub section_visible: bool,
}

impl NavItem {
    /// Top-level entry for a route's page title.
    pub fn main(route_path: impl Into<String>, name: impl Into<String>, text: &str) -> Self {
        Self {
            route_path: route_path.into(),
            name: name.into(),
            label: format_label(text),
            is_main: true,
            active: false,
            section_visible: false,
        }
    }

    /// Sub-heading entry for one section.
    pub fn section(route_path: impl Into<String>, name: impl Into<String>, text: &str) -> Self {
        Self {
            route_path: route_path.into(),
            name: name.into(),
            label: format_label(text),
            is_main: false,
            active: false,
            section_visible: false,
        }
    }

    /// Id of the section container this entry watches.
    pub fn container_id(&self) -> String {
        format!("{}-container", self.name)
    }

    /// Full link target: main entries address the page, sub entries carry
    /// their heading anchor.
    pub fn href(&self, base_path: &str) -> String {
        if self.is_main {
            format!("{}{}", base_path, self.route_path)
        } else {
            format!("{}{}#{}", base_path, self.route_path, self.name)
        }
    }
}

/// Uppercase the first character and turn dashes into spaces.
pub fn format_label(text: &str) -> String {
    let mut chars = text.chars();
    let formatted = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };

    formatted.replace('-', " ")
}
