//! El País opinion scraper
//!
//! Scrapes the El País opinion section across five remote browser/OS/device
//! targets in parallel on BrowserStack, translates the Spanish headlines to
//! English, analyzes them for repeated words, and reports a pass/fail status
//! per target to the Automate dashboard.

pub mod analysis;
pub mod browser;
pub mod capabilities;
pub mod config;
pub mod scrape;
pub mod translate;

/// Initialize console logging with an env-filter (default INFO).
pub fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
