//! Test environment matrix and WebDriver capability construction
//!
//! Five fixed browser/OS/device combinations, each translated into the
//! engine-specific options object plus the vendor `bstack:options` block
//! that the grid uses to provision the right environment.

use serde_json::{json, Value};
use thirtyfour::{Capabilities, DesiredCapabilities};
use tracing::warn;

/// Browser engines with dedicated options objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserEngine {
    Chrome,
    Firefox,
    Safari,
}

impl BrowserEngine {
    /// Case-insensitive match on a configured browser name. Returns `None`
    /// for names that map to no known engine.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.contains("chrome") {
            Some(Self::Chrome)
        } else if name.contains("firefox") {
            Some(Self::Firefox)
        } else if name.contains("safari") {
            Some(Self::Safari)
        } else {
            None
        }
    }
}

/// Where a target browser runs: a desktop OS or a (real) mobile device.
#[derive(Debug, Clone)]
pub enum Platform {
    Desktop {
        os: String,
        os_version: String,
    },
    Mobile {
        device_name: String,
        os_version: String,
        real_device: bool,
    },
}

/// One browser/OS/device combination to run the scrape against.
#[derive(Debug, Clone)]
pub struct CapabilityTarget {
    pub browser_name: String,
    pub browser_version: Option<String>,
    pub platform: Platform,
    pub session_name: String,
}

impl CapabilityTarget {
    fn desktop(
        browser: &str,
        version: &str,
        os: &str,
        os_version: &str,
        session_name: &str,
    ) -> Self {
        Self {
            browser_name: browser.to_string(),
            browser_version: Some(version.to_string()),
            platform: Platform::Desktop {
                os: os.to_string(),
                os_version: os_version.to_string(),
            },
            session_name: session_name.to_string(),
        }
    }

    fn mobile(browser: &str, device_name: &str, os_version: &str, session_name: &str) -> Self {
        Self {
            browser_name: browser.to_string(),
            browser_version: None,
            platform: Platform::Mobile {
                device_name: device_name.to_string(),
                os_version: os_version.to_string(),
                real_device: true,
            },
            session_name: session_name.to_string(),
        }
    }

    /// Vendor options block (`bstack:options`) carrying the platform and the
    /// human-readable session name shown on the dashboard.
    pub fn bstack_options(&self) -> Value {
        match &self.platform {
            Platform::Desktop { os, os_version } => json!({
                "os": os,
                "osVersion": os_version,
                "sessionName": self.session_name,
            }),
            Platform::Mobile {
                device_name,
                os_version,
                real_device,
            } => json!({
                "deviceName": device_name,
                "osVersion": os_version,
                "realMobile": if *real_device { "true" } else { "false" },
                "sessionName": self.session_name,
            }),
        }
    }
}

/// The five browser/OS/device combinations the scrape runs against.
pub fn capability_matrix() -> Vec<CapabilityTarget> {
    vec![
        CapabilityTarget::desktop(
            "Chrome",
            "latest",
            "Windows",
            "11",
            "El Pais Scraper - Win11/Chrome",
        ),
        CapabilityTarget::desktop(
            "Safari",
            "latest",
            "OS X",
            "Sonoma",
            "El Pais Scraper - macOS/Safari",
        ),
        CapabilityTarget::desktop(
            "Firefox",
            "latest",
            "Windows",
            "10",
            "El Pais Scraper - Win10/Firefox",
        ),
        CapabilityTarget::mobile(
            "Safari",
            "iPhone 14 Pro",
            "16",
            "El Pais Scraper - iPhone 14 Pro",
        ),
        CapabilityTarget::mobile(
            "Chrome",
            "Samsung Galaxy S23",
            "13.0",
            "El Pais Scraper - Galaxy S23",
        ),
    ]
}

/// Build the remote session capabilities for one target.
///
/// The engine-specific options object is chosen from the browser name; an
/// unrecognized name falls back to Chrome options without failing the task.
pub fn build_capabilities(target: &CapabilityTarget) -> Capabilities {
    let engine = match BrowserEngine::parse(&target.browser_name) {
        Some(engine) => engine,
        None => {
            warn!(
                "Unknown browser name '{}', falling back to Chrome options",
                target.browser_name
            );
            BrowserEngine::Chrome
        }
    };

    let mut caps: Capabilities = match engine {
        BrowserEngine::Chrome => DesiredCapabilities::chrome().into(),
        BrowserEngine::Firefox => DesiredCapabilities::firefox().into(),
        BrowserEngine::Safari => DesiredCapabilities::safari().into(),
    };

    caps.insert("browserName".to_string(), json!(target.browser_name));
    if let Some(ref version) = target.browser_version {
        caps.insert("browserVersion".to_string(), json!(version));
    }
    caps.insert("bstack:options".to_string(), target.bstack_options());

    caps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_matrix_has_five_unique_targets() {
        let matrix = capability_matrix();
        assert_eq!(matrix.len(), 5);

        let names: HashSet<&str> = matrix.iter().map(|t| t.session_name.as_str()).collect();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_engine_parsing() {
        assert_eq!(BrowserEngine::parse("Chrome"), Some(BrowserEngine::Chrome));
        assert_eq!(BrowserEngine::parse("firefox"), Some(BrowserEngine::Firefox));
        assert_eq!(BrowserEngine::parse("SAFARI"), Some(BrowserEngine::Safari));
        assert_eq!(BrowserEngine::parse("Netscape"), None);
    }

    #[test]
    fn test_desktop_options_block() {
        let target = CapabilityTarget::desktop("Chrome", "latest", "Windows", "11", "Desktop run");
        let options = target.bstack_options();

        assert_eq!(options["os"], "Windows");
        assert_eq!(options["osVersion"], "11");
        assert_eq!(options["sessionName"], "Desktop run");
        assert!(options.get("deviceName").is_none());
    }

    #[test]
    fn test_mobile_options_block() {
        let target = CapabilityTarget::mobile("Safari", "iPhone 14 Pro", "16", "Mobile run");
        let options = target.bstack_options();

        assert_eq!(options["deviceName"], "iPhone 14 Pro");
        assert_eq!(options["osVersion"], "16");
        assert_eq!(options["realMobile"], "true");
        assert_eq!(options["sessionName"], "Mobile run");
        assert!(options.get("os").is_none());
    }

    #[test]
    fn test_build_capabilities_sets_version_and_vendor_block() {
        let target = CapabilityTarget::desktop("Firefox", "latest", "Windows", "10", "FF run");
        let caps = build_capabilities(&target);

        assert_eq!(caps.get("browserName"), Some(&json!("Firefox")));
        assert_eq!(caps.get("browserVersion"), Some(&json!("latest")));
        assert_eq!(
            caps.get("bstack:options").and_then(|o| o.get("sessionName")),
            Some(&json!("FF run"))
        );
    }

    #[test]
    fn test_build_capabilities_skips_absent_version() {
        let target = CapabilityTarget::mobile("Chrome", "Samsung Galaxy S23", "13.0", "S23 run");
        let caps = build_capabilities(&target);

        assert!(caps.get("browserVersion").is_none());
        assert_eq!(
            caps.get("bstack:options").and_then(|o| o.get("realMobile")),
            Some(&json!("true"))
        );
    }

    #[test]
    fn test_unknown_browser_falls_back_without_failing() {
        let target = CapabilityTarget::desktop("Netscape", "latest", "Windows", "11", "Old run");
        let caps = build_capabilities(&target);

        // The record's name is kept even though Chrome options back it
        assert_eq!(caps.get("browserName"), Some(&json!("Netscape")));
    }
}
