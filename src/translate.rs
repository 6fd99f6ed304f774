//! Headline translation
//!
//! Stateless client for the public translate endpoint: one HTTP call per
//! title, each failure logged with the offending title and skipped without
//! aborting the rest of the batch.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Public translation endpoint (the gtx web client API).
const TRANSLATE_API: &str = "https://translate.googleapis.com/translate_a/single";

/// Translation error types
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Translation API returned HTTP {0}")]
    ApiError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<TranslateError> for String {
    fn from(err: TranslateError) -> String {
        err.to_string()
    }
}

/// Translates titles between a fixed source and target language.
pub struct Translator {
    client: Client,
    source: String,
    target: String,
}

impl Translator {
    /// Create a translator for the given language pair.
    pub fn new(source: &str, target: &str) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TranslateError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            source: source.to_string(),
            target: target.to_string(),
        })
    }

    /// Translate a single text.
    pub async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(TRANSLATE_API)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TranslateError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        parse_translation(&body).ok_or_else(|| TranslateError::InvalidResponse(body.to_string()))
    }

    /// Translate a batch of titles, preserving order among the successes.
    ///
    /// Failed items are dropped, not placeheld, so the result does not keep
    /// index alignment with the input.
    pub async fn translate_batch(&self, titles: &[String], label: &str) -> Vec<String> {
        let mut translated = Vec::with_capacity(titles.len());
        for title in titles {
            match self.translate(title).await {
                Ok(english) => {
                    debug!("[{}] ES: {}", label, title);
                    debug!("[{}] EN: {}", label, english);
                    translated.push(english);
                }
                Err(e) => {
                    warn!("[{}] Error translating '{}': {}", label, title, e);
                }
            }
        }
        translated
    }
}

/// Extract the translated text from the endpoint's response.
///
/// The response's first element is a list of `[translated, source, ...]`
/// segments; the translation is their concatenation.
fn parse_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;

    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            out.push_str(text);
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
