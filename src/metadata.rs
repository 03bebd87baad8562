//! Title and description suggestions for new bookmarks.
//!
//! The suggestion comes from one `generateContent` call against the Gemini
//! REST API. Callers go through [`fetch_metadata`], which never fails: every
//! error turns into a fixed fallback pair and is logged.

use crate::config::Config;
use crate::error::MetadataError;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

pub const UNTITLED_TITLE: &str = "Untitled Bookmark";
pub const EMPTY_DESCRIPTION: &str = "No description provided.";
pub const FALLBACK_TITLE: &str = "New Bookmark";
pub const FALLBACK_DESCRIPTION: &str = "Failed to fetch metadata automatically.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

impl Metadata {
    pub fn fallback() -> Self {
        Self { title: FALLBACK_TITLE.into(), description: FALLBACK_DESCRIPTION.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    Fetched,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub metadata: Metadata,
    pub source: MetadataSource,
}

pub trait MetadataFetcher {
    fn fetch(&self, url: &str) -> Result<Metadata, MetadataError>;
}

/// Fetch metadata for `url`, substituting the fallback pair on any failure.
pub fn fetch_metadata(fetcher: &dyn MetadataFetcher, url: &str) -> FetchOutcome {
    match fetcher.fetch(url) {
        Ok(metadata) => {
            log::info!("Fetched metadata for {url}");
            FetchOutcome { metadata, source: MetadataSource::Fetched }
        }
        Err(err) => {
            log::warn!("Metadata fetch failed for {url}: {err}");
            FetchOutcome { metadata: Metadata::fallback(), source: MetadataSource::Fallback }
        }
    }
}

pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self { api_key, model: model.into(), api_base: api_base.into(), timeout }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.clone(),
            config.model.clone(),
            config.api_base.clone(),
            config.fetch_timeout,
        )
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

impl MetadataFetcher for GeminiClient {
    fn fetch(&self, url: &str) -> Result<Metadata, MetadataError> {
        let key = self.api_key.as_deref().ok_or(MetadataError::MissingCredential)?;
        let client = reqwest::blocking::Client::builder().timeout(self.timeout).build()?;

        let response = client
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&request_body(url))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status(status.as_u16()));
        }
        let body: GenerateResponse = response.json()?;
        parse_generate_response(body)
    }
}

pub fn prompt_for(url: &str) -> String {
    format!(
        "Fetch and summarize information for the following URL: {url}. \
         Provide a concise title and a short description (max 2 sentences)."
    )
}

fn request_body(url: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt_for(url) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "description": { "type": "STRING" }
                },
                "required": ["title", "description"]
            }
        }
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SuggestedMetadata {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Turn a `generateContent` response into metadata. The first candidate's
/// text parts are joined and parsed as a JSON object; blank fields get
/// per-field defaults.
pub fn parse_generate_response(response: GenerateResponse) -> Result<Metadata, MetadataError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = if text.trim().is_empty() { "{}" } else { text.trim() };

    let suggested: SuggestedMetadata =
        serde_json::from_str(text).map_err(|e| MetadataError::Malformed(e.to_string()))?;

    let pick = |value: Option<String>, default: &str| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };
    Ok(Metadata {
        title: pick(suggested.title, UNTITLED_TITLE),
        description: pick(suggested.description, EMPTY_DESCRIPTION),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;

    /// Returns the stored metadata, or a server error when there is none.
    struct Fixed(Option<Metadata>);

    impl MetadataFetcher for Fixed {
        fn fetch(&self, _url: &str) -> Result<Metadata, MetadataError> {
            self.0.clone().ok_or(MetadataError::Status(500))
        }
    }

    fn response(text: &str) -> GenerateResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    #[test]
    fn parses_candidate_json() {
        let md = parse_generate_response(response(
            r#"{"title":"Rust","description":"A language."}"#,
        ))
        .unwrap();
        assert_eq!(md, Metadata { title: "Rust".into(), description: "A language.".into() });
    }

    #[test]
    fn empty_fields_get_defaults() {
        let md = parse_generate_response(response(r#"{"title":"  "}"#)).unwrap();
        assert_eq!(md.title, UNTITLED_TITLE);
        assert_eq!(md.description, EMPTY_DESCRIPTION);

        let md = parse_generate_response(GenerateResponse::default()).unwrap();
        assert_eq!(md.title, UNTITLED_TITLE);
    }

    #[test]
    fn non_json_text_is_malformed() {
        let err = parse_generate_response(response("Sure! Here is a title")).unwrap_err();
        assert!(matches!(err, MetadataError::Malformed(_)));
    }

    #[test]
    fn failures_become_fallback() {
        let fetcher = Fixed(None);
        let outcome = fetch_metadata(&fetcher, "https://example.com");
        assert_eq!(outcome.source, MetadataSource::Fallback);
        assert_eq!(outcome.metadata.title, FALLBACK_TITLE);
        assert_eq!(outcome.metadata.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn success_is_marked_fetched() {
        let md = Metadata { title: "T".into(), description: "D".into() };
        let outcome = fetch_metadata(&Fixed(Some(md.clone())), "https://example.com");
        assert_eq!(outcome.source, MetadataSource::Fetched);
        assert_eq!(outcome.metadata, md);
    }

    #[test]
    fn missing_key_falls_back_without_network() {
        let client =
            GeminiClient::new(None, DEFAULT_MODEL, "http://127.0.0.1:9", Duration::from_millis(50));
        let outcome = fetch_metadata(&client, "https://example.com");
        assert_eq!(outcome.source, MetadataSource::Fallback);
    }

    #[test]
    fn unreachable_host_falls_back() {
        let client = GeminiClient::new(
            Some("key".into()),
            DEFAULT_MODEL,
            "http://127.0.0.1:9",
            Duration::from_millis(500),
        );
        let outcome = fetch_metadata(&client, "https://example.com");
        assert_eq!(outcome.metadata, Metadata::fallback());
    }

    #[test]
    fn endpoint_and_prompt() {
        let client = GeminiClient::new(None, "m1", "https://api.example/", Duration::from_secs(1));
        assert_eq!(client.endpoint(), "https://api.example/v1beta/models/m1:generateContent");
        assert!(prompt_for("https://x.y").contains("following URL: https://x.y."));
        let body = request_body("https://x.y");
        assert_eq!(body["generationConfig"]["responseSchema"]["required"][1], "description");
    }
}
