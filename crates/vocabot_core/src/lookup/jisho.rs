//! Jisho word-search client.
//!
//! # Responsibility
//! - Query the word-search endpoint with one keyword.
//! - Reduce the first hit to a `WordEntry`.
//!
//! # Invariants
//! - Requests carry a bounded timeout.
//! - Only `data[0]` is consulted: its slug, first reading and first sense.

use super::{DictionaryLookup, LookupError, LookupResult};
use crate::config::LookupConfig;
use crate::model::record::WordEntry;
use log::{error, info};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::time::Instant;

/// Separator jisho uses for disambiguated slugs such as `橋-1`.
const SLUG_SEPARATOR: char = '-';

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    slug: Option<String>,
    #[serde(default)]
    japanese: Vec<JapaneseForm>,
    #[serde(default)]
    senses: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct JapaneseForm {
    reading: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    #[serde(default)]
    english_definitions: Vec<String>,
}

/// Blocking HTTP client for the jisho search API.
#[derive(Debug, Clone)]
pub struct JishoClient {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl JishoClient {
    /// Builds a client honoring the configured endpoint and timeout.
    ///
    /// # Errors
    /// - `LookupError::Transport` when the HTTP client cannot be built.
    pub fn new(config: &LookupConfig) -> LookupResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            user_agent: config.user_agent.clone(),
        })
    }
}

impl DictionaryLookup for JishoClient {
    fn lookup(&self, word: &str) -> LookupResult<Option<WordEntry>> {
        let started_at = Instant::now();
        info!("event=lookup module=lookup status=start word={word}");

        let result = self.fetch(word);
        match &result {
            Ok(Some(entry)) => info!(
                "event=lookup module=lookup status=ok word={} resolved={} duration_ms={}",
                word,
                entry.word,
                started_at.elapsed().as_millis()
            ),
            Ok(None) => info!(
                "event=lookup module=lookup status=not_found word={} duration_ms={}",
                word,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=lookup module=lookup status=error word={} duration_ms={} error={}",
                word,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

impl JishoClient {
    fn fetch(&self, word: &str) -> LookupResult<Option<WordEntry>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("keyword", word)])
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text()?;
        parse_search_response(&body, word)
    }
}

/// Reduces a search response body to the first hit's entry.
///
/// Returns `Ok(None)` when `data` is empty or absent.
///
/// # Errors
/// - `LookupError::Decode` when the body is not a search response object.
pub fn parse_search_response(body: &str, queried_word: &str) -> LookupResult<Option<WordEntry>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let Some(hit) = response.data.into_iter().next() else {
        return Ok(None);
    };

    let word = hit
        .slug
        .as_deref()
        .and_then(|slug| slug.split(SLUG_SEPARATOR).next())
        .filter(|base| !base.is_empty())
        .unwrap_or(queried_word)
        .to_string();

    let reading = hit
        .japanese
        .into_iter()
        .next()
        .and_then(|form| form.reading)
        .unwrap_or_default();

    let meaning = hit
        .senses
        .into_iter()
        .next()
        .map(|sense| sense.english_definitions.join(", "))
        .unwrap_or_default();

    Ok(Some(WordEntry {
        word,
        reading,
        meaning,
    }))
}

#[cfg(test)]
mod tests {
    use super::parse_search_response;
    use crate::lookup::LookupError;

    #[test]
    fn takes_first_reading_and_first_sense() {
        let body = r#"{
            "meta": {"status": 200},
            "data": [
                {
                    "slug": "犬",
                    "japanese": [{"word": "犬", "reading": "いぬ"}, {"reading": "イヌ"}],
                    "senses": [
                        {"english_definitions": ["dog", "canine"]},
                        {"english_definitions": ["snoop", "spy"]}
                    ]
                },
                {"slug": "戌", "japanese": [{"reading": "いぬ"}], "senses": []}
            ]
        }"#;

        let entry = parse_search_response(body, "犬")
            .expect("parse")
            .expect("entry");
        assert_eq!(entry.word, "犬");
        assert_eq!(entry.reading, "いぬ");
        assert_eq!(entry.meaning, "dog, canine");
    }

    #[test]
    fn truncates_slug_at_first_separator() {
        let body = r#"{"data": [{"slug": "橋-1", "japanese": [{"reading": "はし"}], "senses": []}]}"#;
        let entry = parse_search_response(body, "橋").expect("parse").expect("entry");
        assert_eq!(entry.word, "橋");
        assert_eq!(entry.meaning, "");
    }

    #[test]
    fn falls_back_to_queried_word_without_slug() {
        let body = r#"{"data": [{"japanese": [], "senses": [{"english_definitions": []}]}]}"#;
        let entry = parse_search_response(body, "未知").expect("parse").expect("entry");
        assert_eq!(entry.word, "未知");
        assert_eq!(entry.reading, "");
        assert_eq!(entry.meaning, "");
    }

    #[test]
    fn empty_data_is_not_found() {
        assert_eq!(parse_search_response(r#"{"data": []}"#, "x").expect("parse"), None);
        assert_eq!(parse_search_response(r#"{"meta": {}}"#, "x").expect("parse"), None);
    }

    #[test]
    fn non_object_body_is_decode_error() {
        let err = parse_search_response("<html>busy</html>", "x").expect_err("must fail");
        assert!(matches!(err, LookupError::Decode(_)));
    }
}
