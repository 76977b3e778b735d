//! Help-center changelog scraping.
//!
//! The page is rendered by a headless-browser proxy, then split into
//! heading/description pairs.

mod error;
pub mod parser;
mod service;
mod types;

pub use error::ChangelogError;
pub use parser::parse_changelog;
pub use service::{ChangelogService, PageRenderer};
pub use types::{ChangelogParagraph, ChangelogSettings, GotoOptions, RenderRequest};
