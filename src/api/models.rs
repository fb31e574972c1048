use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::extract::ExtractionStrategy;
use crate::pipeline::RunOutcome;

pub const DOWNLOAD_FILE_NAME: &str = "summary.txt";
pub const DOWNLOAD_MIME_TYPE: &str = "text/plain";

/// Fields posted by the HTML form.
#[derive(Debug, Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequestBody {
    /// Missing counts as an empty URL.
    #[serde(default)]
    pub url: String,
    /// Select label (`"Hindi (hi)"`) or bare code; English when omitted.
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub language: &'static str,
    pub strategy: ExtractionStrategy,
    pub extracted_content: String,
    pub metadata: BTreeMap<String, String>,
    pub summary: String,
    pub word_count: usize,
    pub summarized_at: DateTime<Utc>,
    pub download: DownloadInfo,
}

#[derive(Serialize)]
pub struct DownloadInfo {
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

impl From<RunOutcome> for SummarizeResponse {
    fn from(outcome: RunOutcome) -> Self {
        let word_count = outcome.document.word_count();
        Self {
            url: outcome.request.url.to_string(),
            language: outcome.request.language.code(),
            strategy: outcome.strategy,
            extracted_content: outcome.document.text,
            metadata: outcome.document.metadata,
            summary: outcome.summary.text,
            word_count,
            summarized_at: Utc::now(),
            download: DownloadInfo {
                file_name: DOWNLOAD_FILE_NAME,
                mime_type: DOWNLOAD_MIME_TYPE,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub summary: String,
}
