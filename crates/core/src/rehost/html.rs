//! `<img>` discovery and `src` rewriting.
//!
//! Images are addressed by their ordinal among all `<img>` elements of the
//! document, so both passes must run over the same input. Bytes outside the
//! rewritten attributes are passed through untouched.

use std::collections::HashMap;

use html_escape::decode_html_entities;
use lol_html::{RewriteStrSettings, element, rewrite_str};

use super::error::RehostError;

/// An `<img>` element carrying a `src` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// Position among all `<img>` elements of the document.
    pub ordinal: usize,
    /// `src` value with character references decoded.
    pub src: String,
}

/// List the `src` of every `<img>` in document order.
///
/// The rewriter hands out attribute text as written, so `&amp;` and other
/// character references are decoded here.
///
/// # Errors
///
/// Returns an error if the HTML cannot be tokenized.
pub fn collect_image_sources(html: &str) -> Result<Vec<ImageSource>, RehostError> {
    let mut sources = Vec::new();
    let mut ordinal = 0usize;

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img", |el| {
                if let Some(raw) = el.get_attribute("src") {
                    sources.push(ImageSource {
                        ordinal,
                        src: decode_html_entities(&raw).into_owned(),
                    });
                }
                ordinal += 1;
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| RehostError::Html(e.to_string()))?;

    Ok(sources)
}

/// Replace the `src` of the `<img>` elements whose ordinal is a key of
/// `replacements`.
///
/// # Errors
///
/// Returns an error if the HTML cannot be rewritten.
pub fn rewrite_image_sources(
    html: &str,
    replacements: &HashMap<usize, String>,
) -> Result<String, RehostError> {
    let mut ordinal = 0usize;

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img", |el| {
                if let Some(new_src) = replacements.get(&ordinal) {
                    el.set_attribute("src", new_src)?;
                }
                ordinal += 1;
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| RehostError::Html(e.to_string()))
}

/// Whether `src` points at an absolute HTTP(S) resource.
#[must_use]
pub fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// Path component of an absolute URL, without query or fragment.
#[must_use]
pub fn url_path(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or(rest);
    rest.find('/').map_or("", |i| &rest[i..])
}
