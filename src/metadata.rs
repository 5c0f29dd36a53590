use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use regex::Regex;

use crate::{TranscriptTrack, VideoMetadata, watch_url, youtube::USER_AGENT};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Fields scraped from the watch page. Every field is independent; a missing
/// one leaves its placeholder in the final metadata.
#[derive(Debug, Default, Clone)]
pub struct PageFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<String>,
}

/// Best-effort source of title/author/date for a video. Implementations
/// never fail; degradation is expressed as empty fields.
#[async_trait]
pub trait MetadataAugmenter: Send + Sync {
    async fn augment(&self, video_id: &str) -> PageFields;
}

/// Scrapes the public watch page with independent regex searches.
/// The page markup is not contractually stable, so nothing here is
/// authoritative.
pub struct PageScraper {
    client: reqwest::Client,
    timeout: Duration,
}

impl PageScraper {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl MetadataAugmenter for PageScraper {
    async fn augment(&self, video_id: &str) -> PageFields {
        let url = watch_url(video_id);
        debug!("Scraping watch page for metadata: {url}");

        // Non-200 bodies are scanned like any other; only transport
        // failures degrade to placeholders here.
        let resp = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await;

        match resp {
            Ok(resp) => match resp.text().await {
                Ok(html) => extract_page_fields(&html),
                Err(e) => {
                    debug!("Failed to read watch page body: {e}");
                    PageFields::default()
                }
            },
            Err(e) => {
                debug!("Watch page fetch failed for {video_id}: {e}");
                PageFields::default()
            }
        }
    }
}

/// Augmenter that never fetches anything; all fields stay placeholders.
pub struct NoAugmentation;

#[async_trait]
impl MetadataAugmenter for NoAugmentation {
    async fn augment(&self, _video_id: &str) -> PageFields {
        PageFields::default()
    }
}

/// Run the three field searches over the raw page body. A non-200 body is
/// scanned like any other.
pub fn extract_page_fields(html: &str) -> PageFields {
    PageFields {
        title: extract_field(html, r#"<meta property="og:title" content="([^"]+)""#),
        author: extract_field(html, r#""author":"([^"]+)""#),
        publish_date: extract_field(html, r#""publishDate":"([^"]+)""#),
    }
}

fn extract_field(html: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(html)?;
    // YouTube escapes ampersands as \u0026 in embedded JSON
    Some(caps[1].replace(r"\u0026", "&").replace("&amp;", "&"))
}

/// Assemble the final metadata record from scraped fields (placeholders where
/// missing), the selected track's descriptors, and the current UTC time.
pub fn resolve(video_id: &str, track: &TranscriptTrack, fields: PageFields) -> VideoMetadata {
    VideoMetadata {
        video_id: video_id.to_string(),
        title: fields.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        author: fields.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        publish_date: fields.publish_date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        language: track.language.clone(),
        language_code: track.language_code.clone(),
        is_generated: track.is_generated,
        url: watch_url(video_id),
        fetched_at: chrono::Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> TranscriptTrack {
        TranscriptTrack {
            language: "English".to_string(),
            language_code: "en".to_string(),
            is_generated: true,
        }
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<meta property="og:title" content="Example Video"><body></body>"#;
        let fields = extract_page_fields(html);
        assert_eq!(fields.title.as_deref(), Some("Example Video"));
        assert!(fields.author.is_none());
        assert!(fields.publish_date.is_none());
    }

    #[test]
    fn test_extract_author_independent_of_title() {
        let html = r#"{"author":"Jane Doe","channelId":"UC123"}"#;
        let fields = extract_page_fields(html);
        assert!(fields.title.is_none());
        assert_eq!(fields.author.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_extract_publish_date() {
        let html = r#"{"publishDate":"2024-01-15"}"#;
        let fields = extract_page_fields(html);
        assert_eq!(fields.publish_date.as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn test_extract_all_fields() {
        let html = r#"<meta property="og:title" content="A Video">
            {"author":"Someone","publishDate":"2023-06-01"}"#;
        let fields = extract_page_fields(html);
        assert_eq!(fields.title.as_deref(), Some("A Video"));
        assert_eq!(fields.author.as_deref(), Some("Someone"));
        assert_eq!(fields.publish_date.as_deref(), Some("2023-06-01"));
    }

    #[test]
    fn test_extract_unescapes_ampersands() {
        let html = r#"<meta property="og:title" content="Tom &amp; Jerry">{"author":"A & B"}"#;
        let fields = extract_page_fields(html);
        assert_eq!(fields.title.as_deref(), Some("Tom & Jerry"));
        assert_eq!(fields.author.as_deref(), Some("A & B"));
    }

    #[test]
    fn test_extract_unescapes_json_escaped_ampersands() {
        // Raw string keeps the literal backslash-u sequence, as the page
        // body carries it
        let html = r#"<meta property="og:title" content="Q \u0026 A">{"author":"A \u0026 B"}"#;
        let fields = extract_page_fields(html);
        assert_eq!(fields.title.as_deref(), Some("Q & A"));
        assert_eq!(fields.author.as_deref(), Some("A & B"));
    }

    #[test]
    fn test_extract_nothing() {
        let fields = extract_page_fields("<html><body>unrelated</body></html>");
        assert!(fields.title.is_none());
        assert!(fields.author.is_none());
        assert!(fields.publish_date.is_none());
    }

    #[test]
    fn test_resolve_placeholders() {
        let meta = resolve("abc123", &sample_track(), PageFields::default());
        assert_eq!(meta.title, UNKNOWN_TITLE);
        assert_eq!(meta.author, UNKNOWN_AUTHOR);
        assert_eq!(meta.publish_date, UNKNOWN_DATE);
        assert_eq!(meta.video_id, "abc123");
        assert_eq!(meta.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(meta.language, "English");
        assert_eq!(meta.language_code, "en");
        assert!(meta.is_generated);
        assert!(!meta.fetched_at.is_empty());
    }

    #[test]
    fn test_resolve_scraped_fields_override_placeholders() {
        let fields = PageFields {
            title: Some("Example Video".to_string()),
            author: None,
            publish_date: Some("2024-01-15".to_string()),
        };
        let meta = resolve("abc123", &sample_track(), fields);
        assert_eq!(meta.title, "Example Video");
        assert_eq!(meta.author, UNKNOWN_AUTHOR);
        assert_eq!(meta.publish_date, "2024-01-15");
    }

    #[tokio::test]
    async fn test_no_augmentation_is_empty() {
        let fields = NoAugmentation.augment("abc123").await;
        assert!(fields.title.is_none());
        assert!(fields.author.is_none());
        assert!(fields.publish_date.is_none());
    }
}
