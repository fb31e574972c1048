//! Content extraction shared types.
//!
//! A URL is routed to exactly one [`ExtractionStrategy`]; each strategy has
//! a [`ContentExtractor`] implementation (see [`crate::scraper`] and
//! [`crate::transcript`]).

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::error::{AppError, Result};

/// Transcript languages offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Hindi];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English (en)",
            Language::Hindi => "Hindi (hi)",
        }
    }

    /// Parses a select label such as `"Hindi (hi)"`. The code is taken from
    /// the last word with its parentheses stripped, so a bare `"hi"` works too.
    pub fn from_label(label: &str) -> Result<Self> {
        let code = label
            .split_whitespace()
            .last()
            .unwrap_or_default()
            .trim_matches(|c: char| c == '(' || c == ')');

        Self::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| AppError::UnsupportedLanguage(label.trim().to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Main text of a page or video plus whatever metadata the extractor found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedDocument {
    pub text: String,
    pub metadata: BTreeMap<String, String>,
}

impl ExtractedDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Captions of a hosted video, in the requested language.
    Transcript,
    /// Readable text of an arbitrary web page.
    Document,
}

impl ExtractionStrategy {
    /// Loose host check: any host containing `youtube.com` or `youtu.be`
    /// is treated as a video.
    pub fn for_url(url: &Url) -> Self {
        let is_video = url
            .host_str()
            .is_some_and(|host| host.contains("youtube.com") || host.contains("youtu.be"));

        if is_video {
            ExtractionStrategy::Transcript
        } else {
            ExtractionStrategy::Document
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExtractionStrategy::Transcript => "transcript",
            ExtractionStrategy::Document => "document",
        }
    }
}

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// `Ok(None)` means the source was reachable but yielded no text.
    async fn extract(&self, url: &Url, language: Language) -> Result<Option<ExtractedDocument>>;
}
