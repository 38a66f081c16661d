//! The sidebar model.
//!
//! `Nav` mirrors the router's state: `hydrate` rebuilds the entry list
//! from the route table and content cache, `sync_active` transfers
//! highlighting to the active route's entries, and measured container
//! geometry drives per-section highlighting through the embedded
//! [`SectionObserver`].

use waypost_router::{ContentCache, RouteTable};

use crate::item::NavItem;
use crate::observer::{SectionObserver, SectionRect, ViewportBand};

/// Class tokens applied when rendering the sidebar.
mod classes {
    pub const TITLE: &str = "text-brand text-xl py-4";
    pub const LIST: &str = "list-inside flex flex-col pl-2 pb-4";
    pub const LIST_ITEM: &str = "opacity-80";
    pub const MAIN_LINK: &str = "py-2 transition rounded-r-lg text-xl border-l-4 pl-2 border-light/10 pr-4 dark:!text-brand-LS block !no-underline";
    pub const SECONDARY_LINK: &str = "py-2 rounded-r-lg duration-300 transition border-l-4 pl-2 pr-4 border-light block !no-underline";
    pub const PAGE_ACTIVE: &str = "opacity-100";
    pub const PAGE_ACTIVE_LINK: &str = "border-light/100";
    pub const PAGE_ACTIVE_LINK_MAIN: &str =
        "!font-bold !border-pop !text-brand !bg-light flex justify-between items-center";
    pub const SECTION_VISIBLE: &str = "!text-brand bg-light scale-x-[0.97] !border-brand";

    /// Scroll-to-top hint appended to the active main entry.
    pub const SCROLL_TOP_SPAN: &str = r#"<span class="pointer-events-none"><i aria-hidden="true" class="ml-2 fa-solid fa-arrow-up"></i></span>"#;
}

/// Sidebar state for one router.
#[derive(Debug)]
pub struct Nav {
    title: String,
    base_path: String,
    items: Vec<NavItem>,
    observer: SectionObserver,

    /// Indices highlighted by the previous sync, cleared before applying
    /// new highlighting.
    last_active: Vec<usize>,
}

impl Nav {
    pub fn new(title: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            base_path: base_path.into(),
            items: Vec::new(),
            observer: SectionObserver::new(),
            last_active: Vec::new(),
        }
    }

    pub fn with_band(mut self, band: ViewportBand) -> Self {
        self.observer = SectionObserver::with_band(band);
        self
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn observer(&self) -> &SectionObserver {
        &self.observer
    }

    /// Rebuild the entry list wholesale: one main entry per route with
    /// loaded content, plus one entry per section unless the route opts
    /// out. Routes without cached content are skipped.
    pub fn hydrate(&mut self, table: &RouteTable, cache: &ContentCache) {
        self.items.clear();
        self.last_active.clear();

        for route in table.iter() {
            let Some(page) = cache.get(&route.path) else {
                tracing::debug!("No content for {}, skipping sidebar entry", route.path);
                continue;
            };

            self.items.push(NavItem::main(
                route.path.clone(),
                page.title.id.clone(),
                &page.title.text,
            ));

            if route.nav.ignore_sections {
                continue;
            }

            for section in &page.sections {
                self.items.push(NavItem::section(
                    route.path.clone(),
                    section.id.clone(),
                    &section.title,
                ));
            }
        }
    }

    /// Transfer highlighting to the active route's entries. When the route
    /// changed, the observer is retargeted at the new sub-entries' section
    /// containers; main entries are highlighted directly, without a watch.
    pub fn sync_active(&mut self, current_route: &str, route_changed: bool) {
        for idx in self.last_active.drain(..) {
            if let Some(item) = self.items.get_mut(idx) {
                item.active = false;
                // Section highlights persist across same-route syncs; the
                // observer keeps driving them until it is retargeted.
                if route_changed {
                    item.section_visible = false;
                }
            }
        }

        let on_this_page: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.route_path == current_route)
            .map(|(idx, _)| idx)
            .collect();

        for &idx in &on_this_page {
            self.items[idx].active = true;
        }

        if route_changed {
            let containers: Vec<String> = on_this_page
                .iter()
                .map(|&idx| &self.items[idx])
                .filter(|item| !item.is_main)
                .map(|item| item.container_id())
                .collect();
            self.observer.retarget(containers);
        }

        self.last_active = on_this_page;
    }

    /// Feed measured geometry for one section container. Updates the
    /// matching entry's highlight when its visibility changed.
    pub fn observe_section(
        &mut self,
        container_id: &str,
        viewport_height: f32,
        rect: SectionRect,
    ) {
        let Some(visible) = self.observer.update(container_id, viewport_height, rect) else {
            return;
        };

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| !item.is_main && item.active && item.container_id() == container_id)
        {
            item.section_visible = visible;
        }
    }

    /// Render the sidebar as markup for the host shell.
    pub fn render_html(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "<h2 class=\"{}\">{}</h2>\n",
            classes::TITLE,
            escape(&self.title)
        ));
        out.push_str(&format!("<nav><ul class=\"{}\">\n", classes::LIST));

        for item in &self.items {
            let (li_class, link_class) = if item.is_main {
                (
                    active_classes("", item.active),
                    active_classes_with(
                        classes::MAIN_LINK,
                        item.active,
                        classes::PAGE_ACTIVE_LINK_MAIN,
                    ),
                )
            } else {
                let mut link = active_classes_with(
                    classes::SECONDARY_LINK,
                    item.active,
                    classes::PAGE_ACTIVE_LINK,
                );
                if item.section_visible {
                    link.push(' ');
                    link.push_str(classes::SECTION_VISIBLE);
                }
                (active_classes(classes::LIST_ITEM, item.active), link)
            };

            let suffix = if item.is_main && item.active {
                classes::SCROLL_TOP_SPAN
            } else {
                ""
            };

            out.push_str(&format!(
                "<li class=\"{}\"><a href=\"{}\" class=\"{}\">{}{}</a></li>\n",
                li_class,
                item.href(&self.base_path),
                link_class,
                escape(&item.label),
                suffix
            ));
        }

        out.push_str("</ul></nav>\n");
        out
    }
}

fn active_classes(base: &str, active: bool) -> String {
    active_classes_with(base, active, classes::PAGE_ACTIVE)
}

fn active_classes_with(base: &str, active: bool, extra: &str) -> String {
    if !active {
        return base.to_string();
    }
    if base.is_empty() {
        extra.to_string()
    } else {
        format!("{base} {extra}")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
