//! Splitting of a rendered changelog page into paragraphs.

use scraper::{ElementRef, Html, Selector};

use super::error::ChangelogError;
use super::types::ChangelogParagraph;

/// Strip zero-width spaces, newlines and ASCII spaces.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200b}' | '\n' | ' '))
        .collect()
}

/// Split the first element matching `container_selector` into paragraphs.
///
/// Every descendant element is visited in document order. An element with
/// `heading_class` starts a new paragraph; the text of any other element is
/// appended to the current description unless it repeats the heading or is
/// already part of the description, which drops text of nested elements that
/// their ancestors already contributed. Text before the first heading is
/// discarded. A page without the container yields no paragraphs.
///
/// # Errors
///
/// Returns an error if `container_selector` is not a valid CSS selector.
pub fn parse_changelog(
    html: &str,
    container_selector: &str,
    heading_class: &str,
) -> Result<Vec<ChangelogParagraph>, ChangelogError> {
    let selector = Selector::parse(container_selector)
        .map_err(|e| ChangelogError::Selector(e.to_string()))?;
    let document = Html::parse_document(html);

    let Some(container) = document.select(&selector).next() else {
        return Ok(Vec::new());
    };

    let mut paragraphs = Vec::new();
    let mut heading = String::new();
    let mut description = String::new();

    for element in container.descendants().skip(1).filter_map(ElementRef::wrap) {
        let text = normalize(&element.text().collect::<String>());

        if element.value().classes().any(|class| class == heading_class) {
            if !heading.is_empty() {
                paragraphs.push(ChangelogParagraph {
                    title: std::mem::take(&mut heading),
                    description: std::mem::take(&mut description),
                });
            }
            heading = text;
            description.clear();
        } else if text != heading && !description.contains(&text) {
            description.push_str(&text);
        }
    }

    if !heading.is_empty() {
        paragraphs.push(ChangelogParagraph {
            title: heading,
            description,
        });
    }

    Ok(paragraphs)
}
