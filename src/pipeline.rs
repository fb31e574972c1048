//! One summarize run: preconditions, extraction, summarization.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::{ContentExtractor, ExtractedDocument, ExtractionStrategy, Language};
use crate::llm::{GroqClient, Summarizer, Summary};
use crate::scraper::DocumentExtractor;
use crate::transcript::TranscriptExtractor;

/// A validated user request.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeRequest {
    pub url: Url,
    pub language: Language,
}

impl SummarizeRequest {
    /// Empty input and malformed URLs are rejected before any network call.
    pub fn parse(url_input: &str, language: Language) -> Result<Self> {
        let trimmed = url_input.trim();
        if trimmed.is_empty() {
            return Err(AppError::EmptyUrl);
        }

        let url = Url::parse(trimmed).map_err(|e| AppError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::InvalidUrl(format!("unsupported scheme '{}'", url.scheme())));
        }

        let host = url.host_str().unwrap_or_default();
        let host_ok = host == "localhost"
            || host.trim_matches(|c: char| c == '[' || c == ']').parse::<IpAddr>().is_ok()
            || host.split('.').filter(|label| !label.is_empty()).count() >= 2;
        if !host_ok {
            return Err(AppError::InvalidUrl(format!("invalid host '{}'", host)));
        }

        Ok(Self { url, language })
    }
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub request: SummarizeRequest,
    pub strategy: ExtractionStrategy,
    pub document: ExtractedDocument,
    pub summary: Summary,
}

pub struct Pipeline {
    transcripts: Arc<dyn ContentExtractor>,
    documents: Arc<dyn ContentExtractor>,
    summarizer: Option<Arc<dyn Summarizer>>,
}

impl Pipeline {
    pub fn new(
        transcripts: Arc<dyn ContentExtractor>,
        documents: Arc<dyn ContentExtractor>,
        summarizer: Option<Arc<dyn Summarizer>>,
    ) -> Self {
        Self {
            transcripts,
            documents,
            summarizer,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let summarizer = GroqClient::from_config(config).map(|client| Arc::new(client) as Arc<dyn Summarizer>);
        if summarizer.is_none() {
            tracing::warn!("GROQ_API_KEY is not set, every summarize request will be rejected");
        }

        Ok(Self::new(
            Arc::new(TranscriptExtractor::from_config(config)?),
            Arc::new(DocumentExtractor::from_config(config)?),
            summarizer,
        ))
    }

    pub fn can_summarize(&self) -> bool {
        self.summarizer.is_some()
    }

    fn extractor(&self, strategy: ExtractionStrategy) -> &dyn ContentExtractor {
        match strategy {
            ExtractionStrategy::Transcript => self.transcripts.as_ref(),
            ExtractionStrategy::Document => self.documents.as_ref(),
        }
    }

    pub async fn run(&self, url_input: &str, language: Language) -> Result<RunOutcome> {
        let summarizer = self.summarizer.as_ref().ok_or(AppError::MissingApiKey)?;
        let request = SummarizeRequest::parse(url_input, language)?;

        let strategy = ExtractionStrategy::for_url(&request.url);
        tracing::info!(url = %request.url, strategy = strategy.as_str(), language = request.language.code(), "Extracting content");

        let extract_start = Instant::now();
        let document = self
            .extractor(strategy)
            .extract(&request.url, request.language)
            .await?
            .ok_or(AppError::NoContent)?;
        tracing::debug!(
            chars = document.text.len(),
            words = document.word_count(),
            elapsed = ?extract_start.elapsed(),
            "Content extracted"
        );

        let summary = summarizer.summarize(&document).await?;
        tracing::info!(url = %request.url, summary_chars = summary.text.len(), "Summary ready");

        Ok(RunOutcome {
            request,
            strategy,
            document,
            summary,
        })
    }
}
