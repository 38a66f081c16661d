//! Class token application for generated markup.
//!
//! The style source is a closed mapping from known tag names to ordered
//! class token lists, validated when configuration is loaded. Decoration
//! is a string pass over rendered HTML: class attributes are injected into
//! opening tags, external links are retargeted, and blockquotes receive a
//! decorative glyph inside their first paragraph.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;

/// Glyph prefixed inside the first paragraph of every blockquote.
pub const BLOCKQUOTE_GLYPH: &str = "⚙️ ";

/// Tags that may carry configured class tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyledTag {
    Div,
    Hr,
    H2,
    H3,
    H4,
    H5,
    P,
    Li,
    Ul,
    Ol,
    Table,
    Th,
    Td,
    A,
    Img,
    Blockquote,
    Code,
}

impl StyledTag {
    /// Every styleable tag.
    pub const ALL: [StyledTag; 17] = [
        StyledTag::Div,
        StyledTag::Hr,
        StyledTag::H2,
        StyledTag::H3,
        StyledTag::H4,
        StyledTag::H5,
        StyledTag::P,
        StyledTag::Li,
        StyledTag::Ul,
        StyledTag::Ol,
        StyledTag::Table,
        StyledTag::Th,
        StyledTag::Td,
        StyledTag::A,
        StyledTag::Img,
        StyledTag::Blockquote,
        StyledTag::Code,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyledTag::Div => "div",
            StyledTag::Hr => "hr",
            StyledTag::H2 => "h2",
            StyledTag::H3 => "h3",
            StyledTag::H4 => "h4",
            StyledTag::H5 => "h5",
            StyledTag::P => "p",
            StyledTag::Li => "li",
            StyledTag::Ul => "ul",
            StyledTag::Ol => "ol",
            StyledTag::Table => "table",
            StyledTag::Th => "th",
            StyledTag::Td => "td",
            StyledTag::A => "a",
            StyledTag::Img => "img",
            StyledTag::Blockquote => "blockquote",
            StyledTag::Code => "code",
        }
    }

    /// Parse a configured tag name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

/// Errors raised when building a style sheet from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Unknown style tag: {0}")]
    UnknownTag(String),
}

/// Ordered class tokens per styleable tag.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    classes: HashMap<StyledTag, Vec<String>>,
}

impl StyleSheet {
    /// Empty sheet: decoration adds no classes.
    pub fn none() -> Self {
        Self::default()
    }

    /// The built-in markdown style source.
    pub fn markdown_default() -> Self {
        let mut sheet = Self::default();

        sheet.set(StyledTag::Div, "mx-[-2rem] xl:mx-[-4rem] px-8 xl:px-16 pt-8 mt-8 bg-white border-t-2 border-light scroll-mt-[calc(80px+120px)]");
        sheet.set(StyledTag::Hr, "border-light");
        sheet.set(StyledTag::H2, "text-5xl text-brand leading-[4.5rem] font-bold mb-16 pb-4 pt-8 my-4 md:-mx-8 md:px-8 xl:-mx-16 xl:px-16 bg-white/80 backdrop-blur-md z-20 border-b-2 border-light");
        sheet.set(StyledTag::H3, "text-3xl text-black/100 font-bold bg-white/100 md:-mx-8 md:px-8 xl:-mx-16 xl:px-16 py-2 mb-2 scroll-mt-[120px] md:scroll-mt-[170px] xl:scroll-mt-[calc(201px+2rem)] z-10");
        sheet.set(StyledTag::H4, "text-2xl font-bold text-black/80 py-4 border-light scroll-mt-[140px] md:scroll-mt-[180px] xl:scroll-mt-[calc(201px+4rem)]");
        sheet.set(StyledTag::H5, "text-xl text-brand py-4 scroll-mt-[calc(var(--header-height)+50px)]");
        sheet.set(StyledTag::P, "my-2 text-black/80");
        sheet.set(StyledTag::Li, "py-2 border-b-[1px] border-white px-4");
        sheet.set(StyledTag::Ul, "list-none list-inside border-l-brand bg-light2 border-l-4 shadow my-2 rounded-r-lg");
        sheet.set(StyledTag::Ol, "list-decimal list-inside border-l-brand bg-light2 border-l-4 shadow my-2 rounded-r-lg");
        sheet.set(StyledTag::Table, "w-full border-l-brand bg-light2 border-l-4 shadow my-2 rounded-r-lg");
        sheet.set(StyledTag::Th, "font-bold px-4 py-2 border-b-brand border-b-2 text-left");
        sheet.set(StyledTag::Td, "px-4 py-2 border-white border-b-2 border-l-2");
        sheet.set(StyledTag::A, "hover:underline font-bold text-brand");
        sheet.set(StyledTag::Img, "my-8 shadow-lg rounded-lg");
        sheet.set(StyledTag::Blockquote, "text-black/100 py-2 px-4 my-4 block text-xl border-l-2 rounded-tr-lg rounded-br-lg border-brand bg-darker dark:bg-dark-lighter shadow-inner");
        sheet.set(StyledTag::Code, "px-[4px] py-[2px] text-pop bg-light rounded-md");

        sheet
    }

    /// Replace the tokens for one tag.
    pub fn set(&mut self, tag: StyledTag, tokens: &str) {
        let tokens: Vec<String> = tokens.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            self.classes.remove(&tag);
        } else {
            self.classes.insert(tag, tokens);
        }
    }

    /// Apply configured overrides. Unknown tag names are a hard error.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, StyleError> {
        for (name, tokens) in overrides {
            let tag =
                StyledTag::parse(name).ok_or_else(|| StyleError::UnknownTag(name.to_string()))?;
            self.set(tag, tokens);
        }
        Ok(self)
    }

    /// Joined class attribute value for a tag, if it has tokens.
    pub fn class_attr(&self, tag: StyledTag) -> Option<String> {
        self.classes.get(&tag).map(|tokens| tokens.join(" "))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Inject class attributes into every opening tag this sheet styles.
    pub fn apply(&self, html: &str) -> String {
        let mut out = html.to_string();

        for tag in StyledTag::ALL {
            let Some(classes) = self.class_attr(tag) else {
                continue;
            };

            // Match `<tag>` or `<tag attr=..>` but not longer tag names.
            // Compiled per call; pages are decorated once on load.
            let pattern = format!(r"<{}(?P<attrs>(?:\s[^>]*)?)(?P<close>/?)>", tag.as_str());
            let re = Regex::new(&pattern).expect("static tag pattern");

            out = re
                .replace_all(&out, |caps: &regex::Captures<'_>| {
                    format!(
                        "<{} class=\"{}\"{}{}>",
                        tag.as_str(),
                        classes,
                        &caps["attrs"],
                        &caps["close"]
                    )
                })
                .into_owned();
        }

        out
    }
}

/// Rewrite links that point outside the handbook to open in a new context
/// without a referrer. A link is internal when its href contains the base
/// path; with an empty base path every link counts as internal.
pub fn rewrite_external_links(html: &str, base_path: &str) -> String {
    if base_path.is_empty() {
        return html.to_string();
    }

    let re = Regex::new(r#"<a(?P<attrs>[^>]*\bhref="(?P<href>[^"]*)"[^>]*)>"#)
        .expect("static link pattern");

    re.replace_all(html, |caps: &regex::Captures<'_>| {
        if caps["href"].contains(base_path) {
            caps[0].to_string()
        } else {
            format!(
                "<a{} target=\"_blank\" rel=\"noreferrer\">",
                &caps["attrs"]
            )
        }
    })
    .into_owned()
}

/// Prefix the first paragraph of each blockquote with the decorative glyph.
pub fn prefix_blockquotes(html: &str) -> String {
    let re = Regex::new(r"(?s)(<blockquote[^>]*>\s*<p[^>]*>)").expect("static blockquote pattern");

    re.replace_all(html, |caps: &regex::Captures<'_>| {
        format!("{}{}", &caps[1], BLOCKQUOTE_GLYPH)
    })
    .into_owned()
}

/// Full decoration pass: link rewriting, class injection, blockquote glyph.
pub fn decorate(html: &str, sheet: &StyleSheet, base_path: &str) -> String {
    let html = rewrite_external_links(html, base_path);
    let html = sheet.apply(&html);
    prefix_blockquotes(&html)
}
