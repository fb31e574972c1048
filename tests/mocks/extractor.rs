use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;
use url_summarizer::error::{AppError, Result};
use url_summarizer::extract::{ContentExtractor, ExtractedDocument, Language};

#[derive(Clone, Default)]
pub struct MockExtractor {
    pub document: Option<ExtractedDocument>,
    pub calls: Arc<Mutex<Vec<(String, Language)>>>,
    pub fail_with: Option<String>,
    pub transcript_missing: bool,
}

impl MockExtractor {
    pub fn returning(text: &str) -> Self {
        Self {
            document: Some(ExtractedDocument::new(text).with_metadata("title", "Mock page")),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn without_transcript() -> Self {
        Self {
            transcript_missing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Language)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract(&self, url: &Url, language: Language) -> Result<Option<ExtractedDocument>> {
        self.calls.lock().unwrap().push((url.to_string(), language));
        if let Some(ref msg) = self.fail_with {
            return Err(AppError::Extraction(msg.clone()));
        }
        if self.transcript_missing {
            return Err(AppError::TranscriptUnavailable {
                language: language.code().to_string(),
            });
        }
        Ok(self.document.clone())
    }
}
