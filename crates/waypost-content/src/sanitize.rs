//! Mandatory HTML sanitization.
//!
//! Every piece of markup is cleaned before it reaches the cache, whether it
//! came from markdown conversion or from a raw HTML resource. The cleaner
//! keeps the attributes the viewer relies on: anchor ids, class tokens, and
//! the external-link target/rel pair.

use ammonia::Builder;

/// Sanitize serialized HTML.
pub fn sanitize(html: &str) -> String {
    builder().clean(html).to_string()
}

fn builder() -> Builder<'static> {
    let mut builder = Builder::default();

    builder
        .add_generic_attributes(["class", "id"])
        .add_tag_attributes("a", ["target", "rel"])
        // rel is managed by the link rewriting pass, not the sanitizer.
        .link_rel(None);

    builder
}
