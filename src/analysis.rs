//! Word-frequency analysis of translated headlines
//!
//! Case- and punctuation-insensitive token counts with a fixed stop-word
//! set; tokens occurring more than twice are reported as repeated.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use tracing::info;

/// Common words excluded from frequency analysis.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "in", "on", "of", "for", "to", "is", "and", "with", "it", "by",
    ]
    .into_iter()
    .collect()
});

/// Minimum occurrences (exclusive) for a word to count as repeated.
const REPEAT_THRESHOLD: usize = 2;

/// Token counts in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordFrequencyReport {
    counts: Vec<(String, usize)>,
}

impl WordFrequencyReport {
    /// Build a report from translated titles. Returns `None` when there is
    /// nothing to analyze.
    pub fn from_titles(titles: &[String]) -> Option<Self> {
        if titles.is_empty() {
            return None;
        }

        let joined = titles.join(" ");
        let mut counts: Vec<(String, usize)> = Vec::new();
        for token in tokenize(&joined) {
            match counts.iter().position(|(word, _)| *word == token) {
                Some(index) => counts[index].1 += 1,
                None => counts.push((token, 1)),
            }
        }

        Some(Self { counts })
    }

    /// Occurrences of a single token.
    pub fn count(&self, word: &str) -> usize {
        self.counts
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Tokens occurring more than twice, in the order first encountered.
    pub fn repeated(&self) -> Vec<(&str, usize)> {
        self.counts
            .iter()
            .filter(|(_, count)| *count > REPEAT_THRESHOLD)
            .map(|(word, count)| (word.as_str(), *count))
            .collect()
    }
}

/// Lowercase, strip every character that is neither a word character nor
/// whitespace, split on whitespace, and drop stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Log every repeated word for one task, or the appropriate notice when
/// there is nothing to report.
pub fn log_repeated_words(titles: &[String], label: &str) {
    let Some(report) = WordFrequencyReport::from_titles(titles) else {
        info!("[{}] No titles were translated, skipping analysis", label);
        return;
    };

    let repeated = report.repeated();
    if repeated.is_empty() {
        info!("[{}] No significant repeated words found", label);
        return;
    }

    for (word, count) in repeated {
        info!("[{}] REPEATED WORD: '{}' ({} times)", label, word, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_repeated_word_detection() {
        let report = WordFrequencyReport::from_titles(&titles(&[
            "The Cat Sat",
            "The cat ran fast",
            "A Cat Jumped",
        ]))
        .expect("non-empty input");

        assert_eq!(report.count("cat"), 3);
        assert_eq!(report.repeated(), vec![("cat", 3)]);
    }

    #[test]
    fn test_stop_words_never_reported() {
        // "the" occurs four times, "a" twice; neither may surface
        let report = WordFrequencyReport::from_titles(&titles(&[
            "The end of the road",
            "The road is the way",
            "A way and a road",
        ]))
        .expect("non-empty input");

        assert_eq!(report.count("the"), 0);
        assert_eq!(report.count("a"), 0);
        assert_eq!(report.repeated(), vec![("road", 3)]);
    }

    #[test]
    fn test_empty_input_produces_no_report() {
        assert!(WordFrequencyReport::from_titles(&[]).is_none());
    }

    #[test]
    fn test_counting_is_case_and_punctuation_insensitive() {
        let report =
            WordFrequencyReport::from_titles(&titles(&["Cat, cat; CAT!"])).expect("non-empty");
        assert_eq!(report.count("cat"), 3);
    }

    #[test]
    fn test_repeated_words_in_encounter_order() {
        let report = WordFrequencyReport::from_titles(&titles(&[
            "blue green blue green",
            "blue green red",
        ]))
        .expect("non-empty");

        assert_eq!(report.repeated(), vec![("blue", 3), ("green", 3)]);
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_case() {
        assert_eq!(
            tokenize("Hello, World! What's here?"),
            vec!["hello", "world", "whats", "here"]
        );
    }

    #[test]
    fn test_below_threshold_not_repeated() {
        let report =
            WordFrequencyReport::from_titles(&titles(&["twice twice once"])).expect("non-empty");
        assert!(report.repeated().is_empty());
    }
}
