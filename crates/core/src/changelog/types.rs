//! Changelog types.

use serde::Serialize;

use coshub_shared::ChangelogConfig;

/// One section of the changelog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogParagraph {
    /// Heading text.
    pub title: String,
    /// Concatenated body text under the heading.
    pub description: String,
}

/// Body sent to the headless-browser proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Page to render.
    pub url: String,
    /// Browser user agent.
    pub user_agent: String,
    /// Navigation options.
    pub goto_options: GotoOptions,
}

/// Navigation options of a render request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GotoOptions {
    /// Navigation timeout in milliseconds, sent as a string.
    pub timeout: String,
    /// Navigation completion condition, e.g. `networkidle2`.
    pub wait_until: String,
}

/// What to render and how to split it.
#[derive(Debug, Clone)]
pub struct ChangelogSettings {
    /// Page to render.
    pub page_url: String,
    /// Browser user agent.
    pub user_agent: String,
    /// Navigation timeout in milliseconds.
    pub goto_timeout_ms: u64,
    /// Navigation completion condition.
    pub wait_until: String,
    /// CSS selector of the article body.
    pub container_selector: String,
    /// Class marking a heading element.
    pub heading_class: String,
}

impl ChangelogSettings {
    /// Build settings from configuration.
    #[must_use]
    pub fn from_config(config: &ChangelogConfig, user_agent: impl Into<String>) -> Self {
        Self {
            page_url: config.page_url.clone(),
            user_agent: user_agent.into(),
            goto_timeout_ms: config.goto_timeout_ms,
            wait_until: config.wait_until.clone(),
            container_selector: config.container_selector.clone(),
            heading_class: config.heading_class.clone(),
        }
    }

    /// Render request for the configured page.
    #[must_use]
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            url: self.page_url.clone(),
            user_agent: self.user_agent.clone(),
            goto_options: GotoOptions {
                timeout: self.goto_timeout_ms.to_string(),
                wait_until: self.wait_until.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_request_wire_format() {
        let settings = ChangelogSettings::from_config(&ChangelogConfig::default(), "UA/1.0");
        let body = serde_json::to_value(settings.render_request()).expect("serialize");
        assert_eq!(
            body,
            json!({
                "url": "https://www.feishu.cn/hc/zh-CN/articles/360049067483",
                "userAgent": "UA/1.0",
                "gotoOptions": {"timeout": "20000", "waitUntil": "networkidle2"}
            })
        );
    }
}
