//! The scrape task
//!
//! One full navigate-scrape-translate-analyze pass against a single remote
//! browser target. Session-open failure, navigation failure, or any error
//! escaping the per-field guards fails the task; a missing title, body, or
//! image is logged and skipped. The remote session is always closed last,
//! no matter which step failed.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::analysis;
use crate::browser::{BrowserError, RemoteSession, SessionStatus};
use crate::capabilities::{build_capabilities, CapabilityTarget};
use crate::config::GridConfig;
use crate::translate::Translator;

use super::article::{present_titles, ArticleScrape};

/// Listing page for the opinion section.
pub const OPINION_URL: &str = "https://elpais.com/opinion/";
/// Anchors on the listing page that point at articles.
const ARTICLE_LINK_SELECTOR: &str = "h2 a";
/// Top-level heading on an article page.
const TITLE_SELECTOR: &str = "h1";
/// Article body container; paragraphs are its `p` children.
const CONTENT_SELECTOR: &str = "div.c-article-body";
/// Lead image inside the article figure.
const IMAGE_SELECTOR: &str = "figure img";
/// Maximum number of articles scraped per task.
pub const MAX_ARTICLES: usize = 5;

/// Final outcome of one scrape task, as reported to the dashboard.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutcome {
    pub session_name: String,
    pub status: SessionStatus,
    pub reason: String,
}

/// Run the complete scrape workflow against one capability target.
///
/// Opens a remote session, scrapes the listing and up to five articles,
/// translates the scraped titles, analyzes them, reports pass/fail to the
/// dashboard, and closes the session before returning.
pub async fn run_scrape_task(grid: &GridConfig, target: CapabilityTarget) -> TaskOutcome {
    let session_name = target.session_name.clone();
    info!("--- STARTING TASK: {} ---", session_name);

    let caps = build_capabilities(&target);

    let session = match RemoteSession::connect(&grid.hub_url(), caps, &session_name).await {
        Ok(session) => session,
        Err(e) => {
            // No session was created, so there is nothing to report to the
            // dashboard and nothing to close.
            error!("--- TASK FAILED: {} ---", session_name);
            error!("[{}] {}", session_name, e);
            return TaskOutcome {
                session_name,
                status: SessionStatus::Failed,
                reason: e.to_string(),
            };
        }
    };

    let outcome = match scrape_and_analyze(&session).await {
        Ok(()) => {
            let reason = "Scraping and analysis complete".to_string();
            if let Err(e) = session.mark_status(SessionStatus::Passed, &reason).await {
                warn!("[{}] Failed to report passed status: {}", session_name, e);
            }
            TaskOutcome {
                session_name: session_name.clone(),
                status: SessionStatus::Passed,
                reason,
            }
        }
        Err(e) => {
            error!("--- TASK FAILED: {} ---", session_name);
            error!("[{}] {}", session_name, e);
            let reason = format!("Error: {}", e);
            if let Err(err) = session.mark_status(SessionStatus::Failed, &reason).await {
                warn!("[{}] Failed to report failed status: {}", session_name, err);
            }
            TaskOutcome {
                session_name: session_name.clone(),
                status: SessionStatus::Failed,
                reason,
            }
        }
    };

    // Teardown runs for every outcome; a leaked session holds a grid slot
    // until the provider times it out.
    if let Err(e) = session.quit().await {
        warn!("[{}] {}", session_name, e);
    }

    info!("--- FINISHED TASK: {} ---", session_name);
    outcome
}

/// Steps 3-7 of the task: everything between session open and teardown.
async fn scrape_and_analyze(session: &RemoteSession) -> Result<(), String> {
    let label = session.label().to_string();

    session.goto(OPINION_URL).await?;
    info!("[{}] Navigated to opinion page", label);

    session.wait_visible(ARTICLE_LINK_SELECTOR).await?;
    let article_urls = session
        .collect_links(ARTICLE_LINK_SELECTOR, MAX_ARTICLES)
        .await?;
    info!("[{}] Found {} article URLs", label, article_urls.len());

    let http = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("[{}] HTTP client unavailable, skipping image downloads: {}", label, e);
            None
        }
    };

    let mut articles = Vec::with_capacity(article_urls.len());
    for (index, url) in article_urls.iter().enumerate() {
        info!("[{}] Scraping article {}...", label, index + 1);
        let article = scrape_article(session, url, index + 1, http.as_ref()).await?;
        articles.push(article);
    }

    let spanish_titles = present_titles(&articles);

    info!("[{}] Translating titles...", label);
    let translator = Translator::new("es", "en")?;
    let english_titles = translator.translate_batch(&spanish_titles, &label).await;
    info!(
        "[{}] Translated {} of {} titles",
        label,
        english_titles.len(),
        spanish_titles.len()
    );

    info!("[{}] Analyzing titles...", label);
    analysis::log_repeated_words(&english_titles, &label);

    Ok(())
}

/// Scrape one article page.
///
/// The three field reads are guarded independently: a missing title, body,
/// or image is logged and leaves that field absent without blocking the
/// other reads or the remaining articles. Only the navigation itself can
/// fail the task.
async fn scrape_article(
    session: &RemoteSession,
    url: &str,
    number: usize,
    http: Option<&reqwest::Client>,
) -> Result<ArticleScrape, BrowserError> {
    let label = session.label();
    session.goto(url).await?;

    let mut article = ArticleScrape::default();

    match session.wait_text(TITLE_SELECTOR).await {
        Ok(title) => {
            info!("[{}] Title: {}...", label, snippet(&title, 30));
            article.title = Some(title);
        }
        Err(e) => {
            warn!("[{}] Could not read title for article {}: {}", label, number, e);
        }
    }

    match session.wait_paragraphs(CONTENT_SELECTOR).await {
        Ok(paragraphs) => {
            let body = paragraphs.join("\n");
            info!("[{}] Content snippet: {}...", label, snippet(&body, 50));
            article.body_paragraphs = paragraphs;
        }
        Err(e) => {
            // Cookie banners and paywalls commonly hide the body container.
            warn!(
                "[{}] Could not find content body for article {}: {}",
                label, number, e
            );
        }
    }

    match session.wait_image_src(IMAGE_SELECTOR).await {
        Ok(Some(image_url)) => {
            info!("[{}] Found image URL", label);
            if let Some(client) = http {
                download_image(client, &image_url, number, label).await;
            }
            article.image_url = Some(image_url);
        }
        Ok(None) => {
            warn!("[{}] Image element for article {} has no src", label, number);
        }
        Err(e) => {
            warn!("[{}] No image found for article {}: {}", label, number, e);
        }
    }

    Ok(article)
}

/// Best-effort download of the article's lead image. Failures are logged
/// and never abort the scrape.
async fn download_image(client: &reqwest::Client, image_url: &str, number: usize, label: &str) {
    // One file per article and task, so concurrent tasks never clobber
    // each other's downloads.
    let filename = format!("article_image_{}_{}.jpg", number, slugify(label));

    match client.get(image_url).send().await {
        Ok(response) if response.status().is_success() => match response.bytes().await {
            Ok(bytes) => match std::fs::write(&filename, &bytes) {
                Ok(()) => info!("[{}] Saved image to {}", label, filename),
                Err(e) => warn!("[{}] Could not save image {}: {}", label, filename, e),
            },
            Err(e) => warn!("[{}] Could not read image body: {}", label, e),
        },
        Ok(response) => {
            warn!(
                "[{}] Could not download image, status: {}",
                label,
                response.status()
            );
        }
        Err(e) => {
            warn!("[{}] Could not download image: {}", label, e);
        }
    }
}

/// Truncate to at most `max` characters without splitting a code point.
fn snippet(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Lowercased alphanumeric slug of a session name, for filenames.
fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut last_dash = false;
    for c in label.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash && !slug.is_empty() {
            slug.push('-');
            last_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_respects_char_boundaries() {
        assert_eq!(snippet("short", 30), "short");
        assert_eq!(snippet("Título muy largo de un artículo", 6), "Título");
        // counts characters, not bytes
        assert_eq!(snippet("ñañañaña", 4), "ñaña");
    }

    #[test]
    fn test_slugify_session_names() {
        assert_eq!(
            slugify("El Pais Scraper - Win11/Chrome"),
            "el-pais-scraper-win11-chrome"
        );
        assert_eq!(slugify("  spaced  "), "spaced");
    }

    #[test]
    fn test_article_url_limit() {
        // The listing harvest is capped at five articles per task
        assert_eq!(MAX_ARTICLES, 5);
    }
}
