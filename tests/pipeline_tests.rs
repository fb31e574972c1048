mod mocks;

use mocks::{build_pipeline, extractor::MockExtractor, summarizer::MockSummarizer};
use url_summarizer::error::AppError;
use url_summarizer::extract::{ExtractionStrategy, Language};

const ARTICLE_TEXT: &str = "Rust is a systems programming language focused on safety.";

// ─── Happy path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_website_is_extracted_and_summarized() {
    let transcripts = MockExtractor::empty();
    let documents = MockExtractor::returning(ARTICLE_TEXT);
    let summarizer = MockSummarizer::new("Rust keeps programs memory safe.");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    let outcome = pipeline
        .run("https://example.com/article", Language::English)
        .await
        .expect("run should succeed");

    assert_eq!(outcome.strategy, ExtractionStrategy::Document);
    assert_eq!(outcome.document.text, ARTICLE_TEXT);
    assert!(!outcome.summary.text.is_empty());

    assert_eq!(
        documents.calls(),
        vec![("https://example.com/article".to_string(), Language::English)]
    );
    assert!(transcripts.calls().is_empty(), "Transcript path must not run");
    assert_eq!(summarizer.calls(), vec![ARTICLE_TEXT.to_string()]);
}

#[tokio::test]
async fn test_youtube_url_uses_selected_transcript_language() {
    let transcripts = MockExtractor::returning("namaste duniya");
    let documents = MockExtractor::empty();
    let summarizer = MockSummarizer::new("A greeting.");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    let outcome = pipeline
        .run("https://www.youtube.com/watch?v=abc123", Language::Hindi)
        .await
        .unwrap();

    assert_eq!(outcome.strategy, ExtractionStrategy::Transcript);
    let calls = transcripts.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.code(), "hi");
    assert!(documents.calls().is_empty());
}

#[tokio::test]
async fn test_short_links_route_to_transcripts() {
    let transcripts = MockExtractor::returning("hello world");
    let documents = MockExtractor::returning("unused");
    let summarizer = MockSummarizer::new("Hi.");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    pipeline.run("https://youtu.be/abc123", Language::English).await.unwrap();

    assert_eq!(transcripts.calls().len(), 1);
    assert!(documents.calls().is_empty());
}

#[tokio::test]
async fn test_language_reaches_document_path_unused() {
    let transcripts = MockExtractor::empty();
    let documents = MockExtractor::returning(ARTICLE_TEXT);
    let summarizer = MockSummarizer::new("Summary.");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    let outcome = pipeline.run("https://example.com/article", Language::Hindi).await.unwrap();

    assert_eq!(outcome.strategy, ExtractionStrategy::Document);
    assert!(transcripts.calls().is_empty());
}

// ─── Preconditions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_api_key_blocks_everything() {
    let transcripts = MockExtractor::returning("t");
    let documents = MockExtractor::returning(ARTICLE_TEXT);

    let pipeline = build_pipeline(&transcripts, &documents, None);
    assert!(!pipeline.can_summarize());

    for input in ["https://example.com/article", "https://www.youtube.com/watch?v=abc123", "", "not-a-url"] {
        let err = pipeline.run(input, Language::English).await.unwrap_err();
        assert!(matches!(err, AppError::MissingApiKey), "{input}: {err:?}");
    }

    assert!(documents.calls().is_empty(), "No extraction without a key");
    assert!(transcripts.calls().is_empty(), "No extraction without a key");
}

#[tokio::test]
async fn test_blank_url_is_rejected_without_network() {
    let transcripts = MockExtractor::returning("t");
    let documents = MockExtractor::returning(ARTICLE_TEXT);
    let summarizer = MockSummarizer::new("s");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    for input in ["", "   ", "\t\n"] {
        let err = pipeline.run(input, Language::English).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyUrl));
        assert_eq!(err.user_message(), "Please enter a URL to proceed.");
    }

    assert!(documents.calls().is_empty());
    assert!(transcripts.calls().is_empty());
    assert!(summarizer.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_url_is_rejected_without_network() {
    let transcripts = MockExtractor::returning("t");
    let documents = MockExtractor::returning(ARTICLE_TEXT);
    let summarizer = MockSummarizer::new("s");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    for input in ["not-a-url", "example.com", "https://", "youtube.com/watch?v=abc"] {
        let err = pipeline.run(input, Language::English).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl(_)), "{input}: {err:?}");
        assert_eq!(err.user_message(), "Please enter a valid URL.");
    }

    assert!(documents.calls().is_empty());
    assert!(transcripts.calls().is_empty());
    assert!(summarizer.calls().is_empty());
}

// ─── Failures after validation ───────────────────────────────────────────────

#[tokio::test]
async fn test_empty_extraction_skips_summarizer() {
    let transcripts = MockExtractor::empty();
    let documents = MockExtractor::empty();
    let summarizer = MockSummarizer::new("should not be used");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    let err = pipeline
        .run("https://example.com/article", Language::English)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NoContent));
    assert!(err.user_message().starts_with("No content could be extracted"));
    assert_eq!(documents.calls().len(), 1);
    assert!(summarizer.calls().is_empty(), "Summarizer must not run on empty content");
}

#[tokio::test]
async fn test_extraction_failure_uses_generic_message() {
    let transcripts = MockExtractor::empty();
    let documents = MockExtractor::failing("HTTP 403 Forbidden from https://example.com/article");
    let summarizer = MockSummarizer::new("unused");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    let err = pipeline
        .run("https://example.com/article", Language::English)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Extraction(_)));
    assert!(err.user_message().starts_with("Exception: "));
    assert!(err.user_message().contains("403"));
    assert!(summarizer.calls().is_empty());
}

#[tokio::test]
async fn test_missing_transcript_language_is_not_substituted() {
    let transcripts = MockExtractor::without_transcript();
    let documents = MockExtractor::returning(ARTICLE_TEXT);
    let summarizer = MockSummarizer::new("unused");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    let err = pipeline
        .run("https://www.youtube.com/watch?v=abc123", Language::Hindi)
        .await
        .unwrap_err();

    match err {
        AppError::TranscriptUnavailable { ref language } => assert_eq!(language, "hi"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transcripts.calls().len(), 1, "No retry in another language");
    assert!(documents.calls().is_empty(), "No fallback to page extraction");
    assert!(summarizer.calls().is_empty());
}

#[tokio::test]
async fn test_summarizer_failure_is_terminal() {
    let transcripts = MockExtractor::empty();
    let documents = MockExtractor::returning(ARTICLE_TEXT);
    let summarizer = MockSummarizer::failing("API error: 413 - request too large");

    let pipeline = build_pipeline(&transcripts, &documents, Some(&summarizer));
    let err = pipeline
        .run("https://example.com/article", Language::English)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Summarization(_)));
    assert!(err.user_message().starts_with("Exception: "));
    assert_eq!(summarizer.calls().len(), 1, "No retry");
}
