//! Shell and page templates.
//!
//! The shell is the fixed host document served for every client-side route;
//! it carries the element ids the viewer hydrates into. Rendered pages embed
//! a route's content and sidebar directly for static hosting.

use minijinja::{context, Environment};

/// Values available to the shell template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShellContext {
    /// Site title shown in the document head and sidebar.
    pub site_title: String,

    /// Handbook base path, e.g. `/handbook`.
    pub base_path: String,
}

/// Values available to a rendered page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageContext {
    /// Page title (document head).
    pub title: String,

    pub site_title: String,
    pub base_path: String,

    /// Sidebar markup for this page's active route.
    pub sidebar: String,

    /// The route's full sanitized content markup.
    pub content: String,
}

/// Template engine over the embedded shell and page templates.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("shell.html".to_string(), SHELL_TEMPLATE.to_string())
            .expect("Failed to add shell template");
        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        Self { env }
    }

    /// Render the client-side routing shell.
    pub fn render_shell(&self, ctx: &ShellContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("shell.html")?;

        tmpl.render(context! {
            site_title => &ctx.site_title,
            base_path => &ctx.base_path,
        })
    }

    /// Render one static page.
    pub fn render_page(&self, ctx: &PageContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("page.html")?;

        tmpl.render(context! {
            title => &ctx.title,
            site_title => &ctx.site_title,
            base_path => &ctx.base_path,
            sidebar => &ctx.sidebar,
            content => &ctx.content,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const SHELL_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ site_title }}</title>
  <link rel="stylesheet" href="/assets/css/main.css">
</head>
<body data-base-path="{{ base_path | safe }}">
  <aside id="handbook-nav">
    <button id="handbook-nav-toggle" aria-label="Toggle navigation"></button>
    <div class="loader"></div>
  </aside>
  <main id="handbook-content">
    <div class="loader"></div>
  </main>
  <script src="/dist/handbook/handbook.js" type="module"></script>
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="/assets/css/main.css">
</head>
<body data-base-path="{{ base_path }}">
  <aside id="handbook-nav">
    {{ sidebar | safe }}
  </aside>
  <main id="handbook-content">
    {{ content | safe }}
  </main>
</body>
</html>"##;
