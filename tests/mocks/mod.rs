pub mod extractor;
pub mod summarizer;

use std::sync::Arc;

use url_summarizer::llm::Summarizer;
use url_summarizer::pipeline::Pipeline;

use extractor::MockExtractor;
use summarizer::MockSummarizer;

/// Builds a pipeline over the given mocks. Clones share their call logs,
/// so the caller keeps observing them.
pub fn build_pipeline(
    transcripts: &MockExtractor,
    documents: &MockExtractor,
    summarizer: Option<&MockSummarizer>,
) -> Pipeline {
    Pipeline::new(
        Arc::new(transcripts.clone()),
        Arc::new(documents.clone()),
        summarizer.map(|s| Arc::new(s.clone()) as Arc<dyn Summarizer>),
    )
}
