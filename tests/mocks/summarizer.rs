use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url_summarizer::error::{AppError, Result};
use url_summarizer::extract::ExtractedDocument;
use url_summarizer::llm::{Summarizer, Summary};

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            summary: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, document: &ExtractedDocument) -> Result<Summary> {
        self.calls.lock().unwrap().push(document.text.clone());
        if let Some(ref msg) = self.fail_with {
            return Err(AppError::Summarization(msg.clone()));
        }
        Ok(Summary {
            text: self.summary.clone(),
        })
    }
}
