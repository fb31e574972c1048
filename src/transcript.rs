//! YouTube caption extraction.
//!
//! The watch page embeds the player response as JSON
//! (`ytInitialPlayerResponse = {...};`). It carries the video details and
//! the list of caption tracks, each with a timedtext URL returning XML.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::Html;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::{ContentExtractor, ExtractedDocument, Language};

const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse = ";

static TIMEDTEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<text\b[^>]*>(.*?)</text>").expect("Failed to compile timedtext regex")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub video_details: Option<VideoDetails>,
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    pub tracklist: Option<CaptionTracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTracklist {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `Some("asr")` for auto-generated captions.
    pub kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(default)]
    pub video_id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub length_seconds: Option<String>,
    pub view_count: Option<String>,
    pub short_description: Option<String>,
}

impl PlayerResponse {
    fn caption_tracks(&self) -> &[CaptionTrack] {
        self.captions
            .as_ref()
            .and_then(|c| c.tracklist.as_ref())
            .map(|t| t.caption_tracks.as_slice())
            .unwrap_or_default()
    }
}

pub struct TranscriptExtractor {
    client: Client,
    base_url: String,
}

impl TranscriptExtractor {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://www.youtube.com".into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(client))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_player_response(&self, video_id: &str) -> Result<PlayerResponse> {
        let page = self
            .client
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, video_id = %video_id, "Failed to fetch watch page"))?
            .error_for_status()?
            .text()
            .await?;

        parse_player_response(&page)
    }

    async fn fetch_transcript(&self, track: &CaptionTrack) -> Result<String> {
        let xml = self
            .client
            .get(&track.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_timedtext(&xml))
    }
}

#[async_trait]
impl ContentExtractor for TranscriptExtractor {
    async fn extract(&self, url: &Url, language: Language) -> Result<Option<ExtractedDocument>> {
        let video_id = video_id(url)
            .ok_or_else(|| AppError::Extraction(format!("Could not find a video id in {}", url)))?;

        let player = self.fetch_player_response(&video_id).await?;
        let track = select_track(player.caption_tracks(), language.code()).ok_or_else(|| {
            AppError::TranscriptUnavailable {
                language: language.code().to_string(),
            }
        })?;
        tracing::debug!(
            video_id = %video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let transcript = self.fetch_transcript(track).await?;
        if transcript.is_empty() {
            return Ok(None);
        }

        let mut document = ExtractedDocument::new(transcript)
            .with_metadata("source", video_id.as_str())
            .with_metadata("transcript_language", track.language_code.as_str());

        if let Some(details) = player.video_details {
            let fields = [
                ("title", details.title),
                ("author", details.author),
                ("length_seconds", details.length_seconds),
                ("view_count", details.view_count),
                ("description", details.short_description),
            ];
            for (key, value) in fields {
                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    document = document.with_metadata(key, value);
                }
            }
        }

        Ok(Some(document))
    }
}

/// Video id from the usual URL shapes: `youtu.be/<id>`, `watch?v=<id>`,
/// `/shorts/<id>`, `/embed/<id>`, `/live/<id>` and `/v/<id>`.
pub fn video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = if host.contains("youtu.be") {
        segments.next().map(str::to_string)
    } else if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
        Some(v.into_owned())
    } else {
        match segments.next() {
            Some("shorts" | "embed" | "live" | "v") => segments.next().map(str::to_string),
            _ => None,
        }
    };

    id.filter(|id| {
        !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

/// Finds and decodes the player response embedded in a watch page.
pub fn parse_player_response(page: &str) -> Result<PlayerResponse> {
    let start = page
        .find(PLAYER_RESPONSE_MARKER)
        .map(|pos| pos + PLAYER_RESPONSE_MARKER.len())
        .ok_or_else(|| AppError::Extraction("Player response not found on watch page".to_string()))?;

    // Only the leading JSON object is read, the script continues after it.
    serde_json::Deserializer::from_str(&page[start..])
        .into_iter::<PlayerResponse>()
        .next()
        .ok_or_else(|| AppError::Extraction("Player response is empty".to_string()))?
        .map_err(|e| AppError::Extraction(format!("Invalid player response: {}", e)))
}

/// Track in exactly the requested language, manual captions first.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], language_code: &str) -> Option<&'a CaptionTrack> {
    let mut matching = tracks
        .iter()
        .filter(|track| track.language_code.eq_ignore_ascii_case(language_code));

    let first = matching.next()?;
    if !first.is_generated() {
        return Some(first);
    }
    Some(matching.find(|track| !track.is_generated()).unwrap_or(first))
}

/// Joins the `<text>` segments of a timedtext document with single spaces.
pub fn parse_timedtext(xml: &str) -> String {
    TIMEDTEXT_RE
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        // timedtext escapes entities twice (`&amp;#39;`)
        .map(|m| decode_entities(&decode_entities(m.as_str())))
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    Html::parse_fragment(text).root_element().text().collect()
}
