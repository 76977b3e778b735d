//! Integration tests for the HTTP clients against a mock server.

use std::time::Duration;

use coshub_clients::{BrowserlessRenderer, HttpImageFetcher, build_http_client};
use coshub_core::changelog::{ChangelogError, GotoOptions, PageRenderer, RenderRequest};
use coshub_core::rehost::ImageFetcher;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    build_http_client(Duration::from_secs(5), "coshub-test/1.0").expect("client")
}

fn render_request() -> RenderRequest {
    RenderRequest {
        url: "https://help.test/changelog".to_string(),
        user_agent: "UA/1.0".to_string(),
        goto_options: GotoOptions {
            timeout: "20000".to_string(),
            wait_until: "networkidle2".to_string(),
        },
    }
}

#[tokio::test]
async fn test_fetcher_returns_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/a.png"))
        .and(header("user-agent", "coshub-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG".to_vec()))
        .mount(&server)
        .await;

    let fetcher = HttpImageFetcher::new(client(), 1024);
    let image = fetcher
        .fetch(&format!("{}/img/a.png", server.uri()))
        .await
        .expect("fetch");

    assert_eq!(image.status, 200);
    assert_eq!(&image.body[..], b"\x89PNG");
}

#[tokio::test]
async fn test_fetcher_reports_non_200_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let fetcher = HttpImageFetcher::new(client(), 1024);
    let image = fetcher
        .fetch(&format!("{}/missing.png", server.uri()))
        .await
        .expect("fetch");

    assert_eq!(image.status, 404);
    assert!(image.body.is_empty());
}

#[tokio::test]
async fn test_fetcher_rejects_oversized_image() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/big.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 2048]))
        .mount(&server)
        .await;

    let fetcher = HttpImageFetcher::new(client(), 1024);
    let err = fetcher
        .fetch(&format!("{}/big.png", server.uri()))
        .await
        .unwrap_err();

    assert!(err.0.contains("exceeds 1024 bytes"));
}

#[tokio::test]
async fn test_fetcher_accepts_image_at_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/exact.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 1024]))
        .mount(&server)
        .await;

    let fetcher = HttpImageFetcher::new(client(), 1024);
    let image = fetcher
        .fetch(&format!("{}/exact.png", server.uri()))
        .await
        .expect("fetch");

    assert_eq!(image.body.len(), 1024);
}

#[tokio::test]
async fn test_fetcher_transport_error() {
    let fetcher = HttpImageFetcher::new(client(), 1024);
    // port 9 (discard) is not served by anything in the test environment
    let result = fetcher.fetch("http://127.0.0.1:9/a.png").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_renderer_posts_browserless_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/content"))
        .and(body_json(json!({
            "url": "https://help.test/changelog",
            "userAgent": "UA/1.0",
            "gotoOptions": {"timeout": "20000", "waitUntil": "networkidle2"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let renderer = BrowserlessRenderer::new(client(), format!("{}/content", server.uri()));
    let html = renderer.render(&render_request()).await.expect("render");

    assert_eq!(html, "<html>ok</html>");
}

#[tokio::test]
async fn test_renderer_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let renderer = BrowserlessRenderer::new(client(), format!("{}/content", server.uri()));
    let err = renderer.render(&render_request()).await.unwrap_err();

    assert!(matches!(err, ChangelogError::Renderer(msg) if msg.contains("502")));
}
