//! Static server and page rendering for waypost handbooks.
//!
//! The server delivers the rendered shell and raw markdown resources; the
//! renderer writes one static page per route for hosts that skip
//! client-side routing entirely.

pub mod render;
pub mod server;
pub mod templates;

pub use render::{render_site, RenderConfig, RenderError, RenderedSite};
pub use server::{HandbookServer, ServerConfig, ServerError};
pub use templates::{PageContext, ShellContext, TemplateEngine};
