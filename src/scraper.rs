use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::{ContentExtractor, ExtractedDocument, Language};

// Create static selectors to avoid recompiling them each time
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article", "main", "[role=\"main\"]", "body"]
        .iter()
        .map(|s| Selector::parse(s).expect("Failed to parse content selector"))
        .collect()
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"], meta[property="og:description"]"#)
        .expect("Failed to parse description selector")
});

static HTML_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("html").expect("Failed to parse html selector")
});

/// Subtrees that never hold the readable part of a page.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "nav", "header", "footer", "aside", "form",
    "iframe",
];

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "tr", "table",
    "section", "article", "main", "blockquote", "pre", "figcaption", "dd", "dt", "hr",
];

/// Generic web page extraction over plain HTTP(S).
pub struct DocumentExtractor {
    client: Client,
}

impl DocumentExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the page-fetching client. No timeout is set, requests take as
    /// long as the remote site does.
    pub fn from_config(config: &Config) -> Result<Self> {
        if !config.verify_tls {
            tracing::warn!("TLS certificate verification is disabled for page fetches");
        }

        let client = ClientBuilder::new()
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(client))
    }

    pub async fn fetch_html(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Extraction(format!("HTTP {} from {}", status, url)));
        }

        let html = response.text().await?;
        Ok(html)
    }
}

#[async_trait]
impl ContentExtractor for DocumentExtractor {
    async fn extract(&self, url: &Url, _language: Language) -> Result<Option<ExtractedDocument>> {
        let fetch_start = std::time::Instant::now();
        let html = self.fetch_html(url).await?;
        tracing::debug!(%url, bytes = html.len(), elapsed = ?fetch_start.elapsed(), "Fetched page");

        Ok(extract_document(&html, url))
    }
}

/// Pulls the readable text and basic metadata out of a page. Returns `None`
/// when nothing readable is left after boilerplate removal.
pub fn extract_document(html: &str, url: &Url) -> Option<ExtractedDocument> {
    let document = Html::parse_document(html);

    let root = CONTENT_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::with_capacity(html.len() / 2);
    collect_text(root, &mut raw);

    let text = format_text(&raw);
    if text.is_empty() {
        return None;
    }

    let mut extracted = ExtractedDocument::new(text).with_metadata("source", url.as_str());

    if let Some(title) = document.select(&TITLE_SELECTOR).next() {
        let title = collapse_whitespace(&title.text().collect::<String>());
        if !title.is_empty() {
            extracted = extracted.with_metadata("title", title);
        }
    }

    if let Some(description) = document
        .select(&DESCRIPTION_SELECTOR)
        .find_map(|meta| meta.value().attr("content"))
    {
        let description = collapse_whitespace(description);
        if !description.is_empty() {
            extracted = extracted.with_metadata("description", description);
        }
    }

    if let Some(lang) = document
        .select(&HTML_SELECTOR)
        .next()
        .and_then(|html| html.value().attr("lang"))
    {
        extracted = extracted.with_metadata("language", lang.trim());
    }

    Some(extracted)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }

            let is_block = BLOCK_ELEMENTS.contains(&name);
            if is_block {
                out.push('\n');
            }
            collect_text(child_element, out);
            if is_block {
                out.push('\n');
            }
        }
    }
}

/// One line per block, whitespace collapsed, blank lines dropped.
pub fn format_text(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());

    for line in raw.lines() {
        let line = collapse_whitespace(line);
        if !line.is_empty() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(&line);
        }
    }

    result
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
