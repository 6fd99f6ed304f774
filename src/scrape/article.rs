//! Per-article scrape results

/// Fields scraped from a single article page.
///
/// Every field is best-effort: an absent value means that read failed or
/// timed out, not that the task failed. Records stay 1:1 with the visited
/// URLs, so a missing title never shifts later titles out of position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleScrape {
    pub title: Option<String>,
    pub body_paragraphs: Vec<String>,
    pub image_url: Option<String>,
}

impl ArticleScrape {
    /// Full body text with paragraphs joined by newlines.
    pub fn body_text(&self) -> String {
        self.body_paragraphs.join("\n")
    }
}

/// Titles that were actually scraped, in article order. Absent titles are
/// removed here, before translation.
pub fn present_titles(articles: &[ArticleScrape]) -> Vec<String> {
    articles.iter().filter_map(|a| a.title.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_title(title: Option<&str>) -> ArticleScrape {
        ArticleScrape {
            title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_titles_filtered_order_preserved() {
        let articles = vec![
            with_title(Some("Título Uno")),
            with_title(None),
            with_title(Some("Título Tres")),
        ];

        assert_eq!(
            present_titles(&articles),
            vec!["Título Uno".to_string(), "Título Tres".to_string()]
        );
    }

    #[test]
    fn test_no_articles_yields_no_titles() {
        assert!(present_titles(&[]).is_empty());
    }

    #[test]
    fn test_body_text_joins_paragraphs() {
        let article = ArticleScrape {
            body_paragraphs: vec!["primero".to_string(), "segundo".to_string()],
            ..Default::default()
        };

        assert_eq!(article.body_text(), "primero\nsegundo");
    }
}
