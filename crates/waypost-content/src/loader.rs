//! Route content loading.

use std::sync::Arc;

use regex::Regex;
use tokio::task::JoinSet;

use waypost_router::{ContentCache, PageContent, PageTitle, Route, RouteTable, Section};

use crate::markdown;
use crate::sanitize::sanitize;
use crate::source::{ContentSource, SourceError};
use crate::style::{self, StyleSheet};

/// Errors raised while loading a single route.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The backing resource does not exist; the route must be dropped.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The fetch itself failed; the route keeps its slot but stays empty.
    #[error("Failed to fetch {0}: {1}")]
    Source(String, String),

    /// The document has no top-level heading to serve as the page title.
    #[error("No title heading in content for route {0}")]
    MissingTitle(String),
}

/// Loads and processes route content into the cache.
#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn ContentSource>,
    base_path: String,
    styles: StyleSheet,
}

impl Loader {
    pub fn new(
        source: Arc<dyn ContentSource>,
        base_path: impl Into<String>,
        styles: StyleSheet,
    ) -> Self {
        Self {
            source,
            base_path: base_path.into(),
            styles,
        }
    }

    /// Request path for a route's backing resource:
    /// `{base_path}{stem}.{ext}`.
    pub fn request_path(&self, route: &Route) -> String {
        format!(
            "{}{}.{}",
            self.base_path,
            route.resource_stem(),
            route.kind.extension()
        )
    }

    /// Load one route's content.
    pub fn load(&self, route: &Route) -> Result<PageContent, LoadError> {
        let request = self.request_path(route);

        let raw = self.source.fetch(&request).map_err(|err| match err {
            SourceError::NotFound(path) => LoadError::NotFound(path),
            other => LoadError::Source(request.clone(), other.to_string()),
        })?;

        match route.kind {
            waypost_router::ResourceKind::Markdown => self.markdown_page(route, &raw),
            waypost_router::ResourceKind::Html => self.html_page(route, &raw),
        }
    }

    /// Load every route concurrently. Routes whose resource is missing are
    /// removed from the table; other failures are logged and leave the
    /// route without content. No retries, no rollback.
    pub async fn load_all(&self, table: &mut RouteTable, cache: &mut ContentCache) {
        let mut tasks = JoinSet::new();

        for route in table.iter() {
            let loader = self.clone();
            let route = route.clone();
            tasks.spawn_blocking(move || {
                let outcome = loader.load(&route);
                (route.path, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (path, outcome) = match joined {
                Ok(result) => result,
                Err(err) => {
                    tracing::warn!("Route load task failed: {err}");
                    continue;
                }
            };

            match outcome {
                Ok(page) => {
                    tracing::debug!("Loaded content for {path}");
                    cache.insert(path, page);
                }
                Err(LoadError::NotFound(request)) => {
                    tracing::warn!("{request} not found, dropping route {path}");
                    table.remove(&path);
                }
                Err(err) => {
                    tracing::warn!("Failed to load {path}: {err}");
                }
            }
        }
    }

    /// Convert a markdown resource into a sectioned, decorated, sanitized
    /// page.
    fn markdown_page(&self, route: &Route, raw: &str) -> Result<PageContent, LoadError> {
        let converted = markdown::convert(raw);

        let title = converted
            .title
            .ok_or_else(|| LoadError::MissingTitle(route.path.clone()))?;

        // Keep anchor scrolling consistent: the title id must match the
        // route's path stem.
        let expected_id = route.slug().to_string();
        let fix_title_id = |html: &str| {
            if title.id == expected_id {
                html.to_string()
            } else {
                html.replacen(
                    &format!("id=\"{}\"", title.id),
                    &format!("id=\"{expected_id}\""),
                    1,
                )
            }
        };

        let mut heading_ids = converted.heading_ids;
        if let Some(slot) = heading_ids.iter_mut().find(|h| **h == title.id) {
            *slot = expected_id.clone();
        }

        let decorate = |html: &str| sanitize(&style::decorate(html, &self.styles, &self.base_path));

        if let Some(body) = converted.unsectioned_html {
            let html = decorate(&fix_title_id(&body));

            return Ok(PageContent {
                title: PageTitle {
                    id: expected_id,
                    text: title.text,
                },
                preamble_html: String::new(),
                sections: Vec::new(),
                heading_ids,
                html,
            });
        }

        let title_html = decorate(&fix_title_id(&title.html));
        let preamble_html = decorate(&converted.preamble_html);

        let sections: Vec<Section> = converted
            .sections
            .into_iter()
            .map(|s| Section {
                id: s.id,
                title: s.title,
                html: decorate(&s.html),
            })
            .collect();

        let mut html = String::new();
        html.push_str(&title_html);
        html.push_str(&preamble_html);
        for section in &sections {
            html.push_str(&section.html);
        }

        Ok(PageContent {
            title: PageTitle {
                id: expected_id,
                text: title.text,
            },
            preamble_html,
            sections,
            heading_ids,
            html,
        })
    }

    /// Sanitize a raw HTML resource and store it unsectioned.
    fn html_page(&self, route: &Route, raw: &str) -> Result<PageContent, LoadError> {
        let decorated = style::decorate(raw, &self.styles, &self.base_path);
        let clean = sanitize(&decorated);

        let h2 = Regex::new(r"(?s)<h2(?P<attrs>[^>]*)>(?P<inner>.*?)</h2>")
            .expect("static title pattern");
        let caps = h2
            .captures(&clean)
            .ok_or_else(|| LoadError::MissingTitle(route.path.clone()))?;

        let text = strip_tags(&caps["inner"]).trim().to_string();
        let expected_id = route.slug().to_string();

        // Rewrite the title heading with the corrected id.
        let id_attr = Regex::new(r#"\s*\bid="[^"]*""#).expect("static id pattern");
        let attrs = id_attr.replace(&caps["attrs"], "").into_owned();
        let replacement = format!("<h2 id=\"{expected_id}\"{attrs}>{}</h2>", &caps["inner"]);
        let matched = caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
        let html = clean.replacen(&matched, &replacement, 1);

        let id_scan = Regex::new(r#"<h[2-6][^>]*\bid="(?P<id>[^"]*)""#).expect("static scan");
        let heading_ids: Vec<String> = id_scan
            .captures_iter(&html)
            .map(|c| c["id"].to_string())
            .collect();

        Ok(PageContent {
            title: PageTitle {
                id: expected_id,
                text,
            },
            preamble_html: String::new(),
            sections: Vec::new(),
            heading_ids,
            html,
        })
    }
}

/// Remove markup from a fragment, leaving text content.
fn strip_tags(html: &str) -> String {
    let re = Regex::new(r"<[^>]*>").expect("static strip pattern");
    re.replace_all(html, "").into_owned()
}
