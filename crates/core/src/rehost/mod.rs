//! Rehosting of images referenced from HTML fragments.
//!
//! Every `<img>` with an absolute HTTP(S) `src` is downloaded, uploaded to
//! the bucket under `images/<YYYY>/<MM>/` and its `src` rewritten to the
//! public URL. Two naming modes exist:
//! - `Sequential`: upload time plus running index, always uploads;
//! - `ContentHash`: md5 of the bytes, uploads only when the object is absent.
//!
//! A failing image is logged and skipped; it never fails the request.

mod error;
pub mod html;
mod service;
mod types;

#[cfg(test)]
mod html_props;

pub use error::{FetchError, ImageError, RehostError};
pub use service::{ImageFetcher, Rehoster};
pub use types::{FetchedImage, ImageRecord, RehostMode, RehostReport, RehostRequest};
