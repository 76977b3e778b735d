//! HTTP implementations of the Coshub core collaborator traits.
//!
//! - [`HttpImageFetcher`] downloads images for the rehoster
//! - [`BrowserlessRenderer`] renders pages through a browserless proxy

mod fetcher;
mod http;
mod renderer;

pub use fetcher::HttpImageFetcher;
pub use http::{ClientError, build_http_client};
pub use renderer::BrowserlessRenderer;
