//! Remote browser session management
//!
//! Wraps one WebDriver session on the remote grid: navigation, bounded
//! polling waits for DOM conditions (never fixed sleeps), element reads,
//! and the out-of-band dashboard status call.

use std::time::Duration;

use serde_json::json;
use thirtyfour::prelude::*;
use thirtyfour::Capabilities;
use tracing::{debug, info};

use super::BrowserError;

/// Maximum time to wait for a DOM condition before giving up.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(10);
/// Poll interval for element waits.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Pass/fail status reported to the grid dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Passed,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

/// Dashboard status payload, wrapped in the provider's executor prefix.
fn status_script(status: SessionStatus, reason: &str) -> String {
    let payload = json!({
        "action": "setSessionStatus",
        "arguments": { "status": status.as_str(), "reason": reason },
    });
    format!("browserstack_executor: {}", payload)
}

/// A live remote browser session on the grid.
///
/// The underlying WebDriver session is not closed on drop; callers must
/// release it with [`RemoteSession::quit`] exactly once.
pub struct RemoteSession {
    driver: WebDriver,
    label: String,
}

impl RemoteSession {
    /// Open a session against the grid endpoint with the given capabilities.
    pub async fn connect(
        hub_url: &str,
        caps: Capabilities,
        label: &str,
    ) -> Result<Self, BrowserError> {
        debug!("[{}] Opening remote session", label);
        let driver = WebDriver::new(hub_url, caps)
            .await
            .map_err(|e| BrowserError::SessionOpenFailed(e.to_string()))?;

        info!("[{}] Remote session opened", label);
        Ok(Self {
            driver,
            label: label.to_string(),
        })
    }

    /// Session label used as the log prefix.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Navigate to a URL.
    pub async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        debug!("[{}] Navigating to: {}", self.label, url);
        self.driver
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))
    }

    /// Wait until an element matching the selector is visible.
    pub async fn wait_visible(&self, selector: &str) -> Result<(), BrowserError> {
        self.driver
            .query(By::Css(selector))
            .wait(WAIT_TIMEOUT, POLL_INTERVAL)
            .and_displayed()
            .first()
            .await
            .map(|_| ())
            .map_err(|_| BrowserError::ElementWaitTimeout(selector.to_string()))
    }

    /// Wait until an element matching the selector is present in the DOM,
    /// returning the first match.
    pub async fn wait_present(&self, selector: &str) -> Result<WebElement, BrowserError> {
        self.driver
            .query(By::Css(selector))
            .wait(WAIT_TIMEOUT, POLL_INTERVAL)
            .first()
            .await
            .map_err(|_| BrowserError::ElementWaitTimeout(selector.to_string()))
    }

    /// Wait for the selector, then read the first matching element's text.
    pub async fn wait_text(&self, selector: &str) -> Result<String, BrowserError> {
        let element = self.wait_present(selector).await?;
        element
            .text()
            .await
            .map_err(|e| BrowserError::ElementReadFailed(e.to_string()))
    }

    /// Collect up to `limit` link targets from matching anchors, in DOM
    /// order. Anchors without an href are dropped.
    pub async fn collect_links(
        &self,
        selector: &str,
        limit: usize,
    ) -> Result<Vec<String>, BrowserError> {
        let elements = self
            .driver
            .find_all(By::Css(selector))
            .await
            .map_err(|e| BrowserError::ElementReadFailed(e.to_string()))?;

        let mut urls = Vec::with_capacity(limit);
        for element in elements.into_iter().take(limit) {
            let href = element
                .attr("href")
                .await
                .map_err(|e| BrowserError::ElementReadFailed(e.to_string()))?;
            if let Some(href) = href {
                urls.push(href);
            }
        }
        Ok(urls)
    }

    /// Wait for the container selector, then read the text of its paragraph
    /// children in document order.
    pub async fn wait_paragraphs(&self, selector: &str) -> Result<Vec<String>, BrowserError> {
        let container = self.wait_present(selector).await?;
        let paragraphs = container
            .find_all(By::Tag("p"))
            .await
            .map_err(|e| BrowserError::ElementReadFailed(e.to_string()))?;

        let mut texts = Vec::with_capacity(paragraphs.len());
        for paragraph in paragraphs {
            let text = paragraph
                .text()
                .await
                .map_err(|e| BrowserError::ElementReadFailed(e.to_string()))?;
            texts.push(text);
        }
        Ok(texts)
    }

    /// Wait until the selector is visible, then read its `src` attribute.
    pub async fn wait_image_src(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        self.wait_visible(selector).await?;
        let element = self
            .driver
            .find(By::Css(selector))
            .await
            .map_err(|e| BrowserError::ElementReadFailed(e.to_string()))?;

        element
            .attr("src")
            .await
            .map_err(|e| BrowserError::ElementReadFailed(e.to_string()))
    }

    /// Report pass/fail to the grid dashboard via the in-session executor
    /// hook. Sent once per task at the end of its lifecycle.
    pub async fn mark_status(
        &self,
        status: SessionStatus,
        reason: &str,
    ) -> Result<(), BrowserError> {
        let script = status_script(status, reason);
        self.driver
            .execute(&script, Vec::new())
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::ScriptFailed(e.to_string()))
    }

    /// Close the remote session. The grid keeps abandoned sessions alive
    /// until they time out, so this must run even after a failed scrape.
    pub async fn quit(self) -> Result<(), BrowserError> {
        let label = self.label;
        self.driver
            .quit()
            .await
            .map_err(|e| BrowserError::QuitFailed(e.to_string()))?;

        info!("[{}] Remote session closed", label);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_strings() {
        assert_eq!(SessionStatus::Passed.as_str(), "passed");
        assert_eq!(SessionStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn test_status_script_payload() {
        let script = status_script(SessionStatus::Failed, "Error: boom");

        let json_part = script
            .strip_prefix("browserstack_executor: ")
            .expect("executor prefix");
        let payload: serde_json::Value = serde_json::from_str(json_part).expect("valid JSON");

        assert_eq!(payload["action"], "setSessionStatus");
        assert_eq!(payload["arguments"]["status"], "failed");
        assert_eq!(payload["arguments"]["reason"], "Error: boom");
    }

    #[test]
    fn test_wait_bounds() {
        // DOM waits are bounded polls, not fixed sleeps
        assert_eq!(WAIT_TIMEOUT, Duration::from_secs(10));
        assert!(POLL_INTERVAL < WAIT_TIMEOUT);
    }
}
